use folio_core::carousel::{Carousel, NavDirection, NavKey, Slide};
use folio_core::content::{
    Category, ContentFile, ContentStore, ImageRef, ProjectId, ProjectRecord, Profile,
};
use folio_core::geometry::Point;
use folio_core::preload::{PreloadOutcome, PreloadProgress};
use folio_core::radial::{MenuAction, MenuOutcome, RadialMenu};
use folio_core::route::{Route, Router};
use folio_core::viewer::{Gesture, PointerButton, Timestamp, Viewer, ViewerEvent};

fn project(id: u32) -> ProjectRecord {
    ProjectRecord {
        id: ProjectId::from(id),
        title: format!("Project {id}"),
        description: String::new(),
        long_description: None,
        details: Vec::new(),
        image: ImageRef::new(format!("{id}.png")),
        tags: Vec::new(),
        category: Category::Personal,
        repository: None,
        live: None,
    }
}

fn store(n: u32) -> ContentStore {
    ContentStore::new(Profile::default(), (1..=n).map(project).collect()).unwrap()
}

#[test]
fn four_projects_end_on_the_more_projects_slide() {
    let content = store(4);
    let mut carousel = Carousel::new(content.len());
    assert_eq!(carousel.total_slides(), 5);

    for _ in 0..4 {
        assert!(carousel.goto(NavDirection::Forward).is_some());
    }
    assert_eq!(carousel.index(), 4);
    assert_eq!(carousel.slide(), Slide::MoreProjects);
    assert!(content.get(carousel.index()).is_none());
    assert_eq!(carousel.position_label(), "05 / 05");
}

#[test]
fn viewer_round_trip_from_slide_two() {
    let content = store(4);
    let mut carousel = Carousel::new(content.len());
    carousel.goto(NavDirection::Forward);
    carousel.goto(NavDirection::Forward);
    assert_eq!(carousel.slide(), Slide::Project(2));

    let mut viewer = Viewer::new();
    carousel.on_viewer_event(viewer.open());
    assert_eq!(viewer.scale(), 1.0);
    assert_eq!(viewer.pan(), Point::ORIGIN);
    assert!(carousel.handle_key(NavKey::Right).is_none());

    let at = Point::new(320.0, 240.0);
    viewer.press(PointerButton::Primary, at, Timestamp::from(10_000u64));
    assert_eq!(
        viewer.release(at, Timestamp::from(10_080u64)),
        Some(Gesture::Click)
    );
    assert_eq!(viewer.scale(), 1.5);

    let closed = viewer.close();
    assert_eq!(closed, ViewerEvent::Closed);
    carousel.on_viewer_event(closed);
    carousel.on_viewer_event(viewer.open());
    assert_eq!(viewer.scale(), 1.0);
    assert_eq!(viewer.pan(), Point::ORIGIN);
    assert_eq!(carousel.index(), 2);
}

#[test]
fn preloading_the_store_reaches_one_hundred() {
    let content = store(3);
    let mut progress = PreloadProgress::new(content.image_refs().len());
    let outcomes = [
        PreloadOutcome::Loaded,
        PreloadOutcome::Failed,
        PreloadOutcome::Loaded,
    ];
    let seen: Vec<u8> = outcomes.into_iter().map(|o| progress.record(o)).collect();
    assert_eq!(seen, vec![33, 67, 100]);
}

#[test]
fn menu_navigation_routes_to_about() {
    let mut router = Router::default();
    let mut menu = RadialMenu::new();
    assert!(menu.wheel(-120.0));

    match menu.activate(MenuAction::About) {
        MenuOutcome::Navigate { route, .. } => {
            router.navigate(route);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(router.current(), Route::About);
    router.back();
    assert_eq!(router.current(), Route::Home);
}

#[test]
fn content_file_parses_from_json() {
    let json = r#"{
        "profile": {
            "name": "Kun",
            "headline": "Selv Projects.",
            "tagline": "Exploring digital experiences through code and design.",
            "email": "someone@example.com",
            "more_projects_url": "https://github.com/example"
        },
        "projects": [
            {"id": 1, "title": "A", "description": "a", "image": "a.png", "category": "personal"},
            {"id": 2, "title": "B", "description": "b", "image": "b.png", "category": "collaboration",
             "details": ["one", "two"], "live": "https://example.com"}
        ]
    }"#;
    let file: ContentFile = serde_json::from_str(json).unwrap();
    let content = ContentStore::try_from(file).unwrap();
    assert_eq!(content.len(), 2);
    assert_eq!(content.profile().headline, "Selv Projects.");
    assert_eq!(content.projects()[1].details.len(), 2);
    assert!(content.projects()[0].repository.is_none());
}
