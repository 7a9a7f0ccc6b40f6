//! Day-to-day scenarios: tasks are created, then browsed by day and by month

use datebook::store::MemoryStore;
use datebook::{project, Agenda, Mark, NewTask, TaskError, TaskRepository, ValidationError};
use datebook::config::Settings;


#[tokio::test]
async fn test_week_of_work() {
    let _ = env_logger::builder().is_test(true).try_init();

    let repo = TaskRepository::new(MemoryStore::new());
    let prep = repo.append(NewTask::new("Prep").with_date("2024-06-03")).await.unwrap();
    let review = repo.append(NewTask::new("Review").with_date("2024-06-03")).await.unwrap();
    let ship = repo.append(NewTask::new("Ship").with_date("2024-06-05")).await.unwrap();

    let monday = repo.find_by_date("2024-06-03").await.unwrap();
    assert_eq!(monday, vec![prep.clone(), review.clone()]);
    assert_eq!(repo.find_by_date("2024-06-05").await.unwrap(), vec![ship.clone()]);
    assert!(repo.find_by_date("2024-06-04").await.unwrap().is_empty());

    let all = repo.load_all().await.unwrap();
    assert_eq!(all, vec![prep, review, ship]);

    let marks = project(&all, None);
    assert_eq!(marks.len(), 2);
    assert_eq!(marks.get("2024-06-03"), Some(&Mark::dot()));
    assert_eq!(marks.get("2024-06-05"), Some(&Mark::dot()));
}

#[tokio::test]
async fn test_append_grows_the_collection_by_one() {
    let _ = env_logger::builder().is_test(true).try_init();

    let repo = TaskRepository::new(MemoryStore::new());
    for i in 0..5 {
        let before = repo.load_all().await.unwrap().len();
        let title = format!("Task {}", i);
        let stored = repo.append(
            NewTask::new(format!("  {}  ", title))
                .with_date("2024-6-1")
                .with_time("7:30")
                .with_notes("some notes")
                .with_assignee("Sam")
        ).await.unwrap();

        let after = repo.load_all().await.unwrap();
        assert_eq!(after.len(), before + 1);

        let last = after.last().unwrap();
        assert_eq!(last, &stored);
        assert_eq!(last.title(), title);
        assert_eq!(last.date().to_string(), "2024-06-01");
        assert_eq!(last.time().unwrap().to_string(), "07:30");
        assert_eq!(last.notes(), "some notes");
        assert_eq!(last.assignee(), "Sam");

        // Every task shows up once in its day, and nowhere else
        let day = repo.find_by_date("2024-06-01").await.unwrap();
        assert_eq!(day.iter().filter(|t| t.id() == stored.id()).count(), 1);
        assert!(repo.find_by_date("2024-06-02").await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_blank_title_is_refused() {
    let _ = env_logger::builder().is_test(true).try_init();

    let repo = TaskRepository::new(MemoryStore::new());
    repo.append(NewTask::new("Prep").with_date("2024-06-03")).await.unwrap();

    match repo.append(NewTask::new("   ").with_date("2024-06-03")).await {
        Err(TaskError::Validation(ValidationError::EmptyTitle)) => (),
        other => panic!("Unexpected result {:?}", other),
    }
    assert_eq!(repo.load_all().await.unwrap().len(), 1);
    assert_eq!(repo.reload().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_many_tasks_one_dot() {
    let _ = env_logger::builder().is_test(true).try_init();

    let agenda = Agenda::from_settings(MemoryStore::new(), &Settings::default());
    for i in 0..5 {
        agenda.add(NewTask::new(format!("Meeting {}", i)).with_date("2024-06-10")).await.unwrap();
    }

    let marks = agenda.refresh(Some("2024-06-10")).await.unwrap();
    assert_eq!(marks.len(), 1);
    assert_eq!(marks.get("2024-06-10"), Some(&Mark::selected_dot()));

    let json = serde_json::to_value(&marks).unwrap();
    assert_eq!(json["2024-06-10"]["dots"].as_array().map(|dots| dots.len()), Some(1));

    // Selecting an empty day highlights nothing
    let marks = agenda.refresh(Some("2024-06-11")).await.unwrap();
    assert!(marks.selected().is_none());
    assert!(marks.get("2024-06-11").is_none());
}

#[tokio::test]
async fn test_tasks_written_by_an_older_version() {
    use datebook::traits::KeyValueStore;

    let _ = env_logger::builder().is_test(true).try_init();

    let store = MemoryStore::new();
    store.set("tasks", r#"[
        {"id":"0b7c","title":"Prep","notes":"slides","assignee":"","date":"2024-06-03","time":"09:00"},
        {"id":"1f2e","title":"Review","date":"2024-06-03"}
    ]"#.to_string()).await.unwrap();

    let repo = TaskRepository::new(store);
    let monday = repo.find_by_date("2024-06-03").await.unwrap();
    assert_eq!(monday.len(), 2);
    assert_eq!(monday[0].id().as_str(), "0b7c");
    assert_eq!(monday[0].notes(), "slides");
    assert!(monday[1].is_all_day());

    repo.append(NewTask::new("Ship").with_date("2024-06-05")).await.unwrap();
    assert_eq!(repo.reload().await.unwrap().len(), 3);
}
