//! Services running against the flat-file store, checked through the file
//! contents they leave behind.

use std::path::Path;
use std::sync::Arc;

use mvc_core::model::TITLE_REQUIRED;
use mvc_core::{view, HeroError, HeroService, NewTask, Task, TaskError, TaskService};
use mvc_storage::JsonFileStore;

fn new_task(id: i64, title: &str, description: &str) -> NewTask {
    NewTask::new(id, title, description)
}

fn task_service(path: &Path) -> TaskService<JsonFileStore<Task>> {
    TaskService::new(Arc::new(JsonFileStore::new(path)))
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn task_lifecycle_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tareas.txt");
    let service = task_service(&path);

    service.create(new_task(1, "Buy milk", "")).await.unwrap();
    service.create(new_task(2, "Walk dog", "park")).await.unwrap();
    assert!(service.complete(2).await.unwrap());

    assert_eq!(
        read_json(&path),
        serde_json::json!([
            {"id": 1, "titulo": "Buy milk", "descripcion": "", "completado": false},
            {"id": 2, "titulo": "Walk dog", "descripcion": "park", "completado": true}
        ])
    );

    // A fresh service over the same file sees the same collection.
    let reopened = task_service(&path);
    let completed = reopened.list_completed().await.unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, 2);

    assert_eq!(reopened.delete(1).await.unwrap(), 1);
    assert_eq!(reopened.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn rejected_create_never_creates_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tareas.txt");
    let service = task_service(&path);

    match service.create(new_task(1, "  ", "x")).await {
        Err(TaskError::Validation(msg)) => assert_eq!(msg, TITLE_REQUIRED),
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(!path.exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_are_all_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tareas.txt");
    let service = task_service(&path);

    let mut handles = Vec::new();
    for id in 0..16 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .create(new_task(id, &format!("task {id}"), ""))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let mut ids: Vec<i64> = service
        .list_all()
        .await
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, (0..16).collect::<Vec<_>>());
}

#[tokio::test]
async fn corrupt_task_file_surfaces_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tareas.txt");
    std::fs::write(&path, "not json").unwrap();
    let service = task_service(&path);

    assert!(matches!(
        service.list_all().await,
        Err(TaskError::Storage(_))
    ));
    assert!(matches!(
        service.create(new_task(1, "a", "")).await,
        Err(TaskError::Storage(_))
    ));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "not json");
}

#[tokio::test]
async fn heroes_read_from_english_keyed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("superheroes.txt");
    std::fs::write(
        &path,
        r#"[
          {"id": 1, "name": "Thor", "realName": "Thor Odinson", "age": 1500,
           "homePlanet": "Earth", "weakness": "pride",
           "powers": ["lightning", "flight"], "allies": [], "enemies": ["Loki"]}
        ]"#,
    )
    .unwrap();
    let service = HeroService::new(Arc::new(JsonFileStore::new(&path)));

    let thor = service.get_by_id(1).await.unwrap().unwrap();
    assert_eq!(thor.real_name, "Thor Odinson");
    assert_eq!(
        service
            .older_than_30_earth_heroes_with_multiple_powers()
            .await
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        service.find_by_attribute("enemigos", "loki").await.unwrap().len(),
        1
    );
    assert!(matches!(
        service.find_by_attribute("capa", "roja").await,
        Err(HeroError::UnknownAttribute(_))
    ));

    // Rendering uses the Spanish keys regardless of how the file was keyed.
    let rendered: serde_json::Value = serde_json::from_str(&view::render_hero(&thor)).unwrap();
    assert_eq!(rendered["nombreSuperHeroe"], "Thor");
    assert_eq!(rendered["planetaOrigen"], "Earth");
}

#[tokio::test]
async fn unknown_task_keys_survive_complete_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tareas.txt");
    std::fs::write(
        &path,
        r#"[
          {"id": 1, "titulo": "a", "descripcion": "", "completado": false, "prioridad": "alta"},
          {"id": 2, "titulo": "b", "descripcion": "", "completado": false, "prioridad": "baja"},
          {"id": 3, "titulo": "c", "descripcion": "", "completado": true, "prioridad": "media"}
        ]"#,
    )
    .unwrap();
    let service = task_service(&path);

    assert!(service.complete(1).await.unwrap());
    assert_eq!(service.delete(3).await.unwrap(), 1);

    assert_eq!(
        read_json(&path),
        serde_json::json!([
            {"id": 1, "titulo": "a", "descripcion": "", "completado": true, "prioridad": "alta"},
            {"id": 2, "titulo": "b", "descripcion": "", "completado": false, "prioridad": "baja"}
        ])
    );
}

#[tokio::test]
async fn heroes_file_with_odd_records_still_serves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("superheroes.txt");
    std::fs::write(
        &path,
        r#"[
          {"id": 1, "nombreSuperHeroe": "Batman", "edad": 40, "planetaOrigen": "Tierra",
           "poder": ["Inteligencia", "Artes marciales"], "genero": "Masculino"},
          {"id": 2, "nombreSuperHeroe": "Nadie", "edad": null, "poder": null, "aliados": null}
        ]"#,
    )
    .unwrap();
    let service = HeroService::new(Arc::new(JsonFileStore::new(&path)));

    let batman = service.get_by_id(1).await.unwrap().unwrap();
    let rendered: serde_json::Value = serde_json::from_str(&view::render_hero(&batman)).unwrap();
    assert_eq!(rendered["genero"], "Masculino");
    assert_eq!(rendered["edad"], 40);

    let nobody = service.get_by_id(2).await.unwrap().unwrap();
    assert!(nobody.powers.is_empty());

    let by_gender = service.find_by_attribute("genero", "masc").await.unwrap();
    assert_eq!(by_gender.len(), 1);
    assert_eq!(by_gender[0].id, 1);

    let older = service
        .older_than_30_earth_heroes_with_multiple_powers()
        .await
        .unwrap();
    assert_eq!(older.len(), 1);
    assert_eq!(older[0].id, 1);
}
