use std::collections::BTreeSet;

use tramas_core::viewer::{OPEN_FADE_SECS, SWAP_FADE_SECS};
use tramas_core::{
    compute_view, ImageRecord, TimelineEvent, ViewerItem, ViewerPhase, ViewerSession,
    CATCH_ALL_LABEL,
};

fn record(id: i64, file: &str, topics: &[&str], order: i64) -> ImageRecord {
    ImageRecord {
        id,
        file_name: file.to_string(),
        title: Some(format!("Imagem {id}")),
        corroboration: None,
        tags: Vec::new(),
        detected_topics: topics.iter().map(|t| t.to_string()).collect(),
        admin_assigned_section: None,
        chronological_order: order,
    }
}

/// Opening the viewer from a topic bucket scopes navigation to that bucket,
/// not to the master list.
#[test]
fn viewer_scope_is_the_entered_bucket() {
    let master = vec![
        record(1, "p1.jpg", &["Panceri"], 1),
        record(2, "g1.jpg", &[], 2),
        record(3, "p2.jpg", &["Panceri"], 3),
        record(4, "g2.jpg", &[], 4),
    ];
    let view = compute_view(&master, &BTreeSet::new(), "");
    let panceri = view
        .buckets
        .iter()
        .find(|b| b.label == "Panceri")
        .expect("panceri bucket");
    assert_eq!(panceri.images.len(), 2);

    let scoped: Vec<ViewerItem> = panceri.images.iter().map(ViewerItem::from).collect();
    let mut session = ViewerSession::new();
    session.open_scoped(scoped, 0).unwrap();
    session.advance(OPEN_FADE_SECS + 0.01);

    assert_eq!(session.current_item().unwrap().file_name, "p1.jpg");
    assert!(session.navigate(1));
    assert_eq!(session.current_item().unwrap().file_name, "p2.jpg");
    // Only the bucket's two images are reachable.
    assert!(!session.navigate(1));
}

/// Opening a timeline thumbnail scopes navigation to that event's images in
/// their display order.
#[test]
fn viewer_scope_from_timeline_event() {
    let event = TimelineEvent {
        id: 9,
        section: "pompeia".into(),
        sub_section: None,
        year: Some(1950),
        title: "Auge da tecelagem".into(),
        text: "42 anos de atividade".into(),
        images: vec!["pag1.png".into(), "pag2.png".into(), "pag3.png".into()],
        corroboration: Some("O Pioneiro, 25/03/1950".into()),
    };

    let mut session = ViewerSession::new();
    session.open_scoped(event.viewer_items(), 1).unwrap();
    session.advance(OPEN_FADE_SECS + 0.01);

    assert_eq!(session.current_item().unwrap().file_name, "pag2.png");
    assert_eq!(
        session.current_item().unwrap().corroboration.as_deref(),
        Some("O Pioneiro, 25/03/1950")
    );
    assert!(session.can_go_prev());
    assert!(session.can_go_next());
    assert!(session.navigate(-1));
    assert!(!session.navigate(-1));
    assert_eq!(session.current_item().unwrap().file_name, "pag1.png");
}

/// A full open → browse → close round trip leaves the session reusable.
#[test]
fn session_survives_reuse_across_scopes() {
    let master = vec![record(1, "a.jpg", &[], 1), record(2, "b.jpg", &[], 2)];
    let view = compute_view(&master, &BTreeSet::new(), "");
    let geral = view
        .buckets
        .iter()
        .find(|b| b.label == CATCH_ALL_LABEL)
        .unwrap();

    let mut session = ViewerSession::new();
    session
        .open_scoped(geral.images.iter().map(ViewerItem::from).collect(), 0)
        .unwrap();
    session.advance(OPEN_FADE_SECS + 0.01);
    session.navigate(1);
    session.advance(SWAP_FADE_SECS + 0.01);
    session.close();
    session.advance(1.0);
    assert_eq!(session.phase(), ViewerPhase::Closed);

    // Re-open from a different scope.
    session
        .open_scoped(
            vec![ViewerItem {
                file_name: "solo.jpg".into(),
                title: None,
                corroboration: None,
            }],
            0,
        )
        .unwrap();
    session.advance(OPEN_FADE_SECS + 0.01);
    assert_eq!(session.current_item().unwrap().file_name, "solo.jpg");
    assert!(!session.can_go_next());
}
