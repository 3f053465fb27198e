//! End-to-end navigation scenarios against an in-memory host.

use techblog::app::{AppState, Event, MemoryHost, Runtime, LOAD_FAILURE_MESSAGE};
use techblog::content::{ContentSource, DirectorySource, StaticSource};
use techblog::notify::{Channel, NotificationKind};
use techblog::routing::Selection;
use techblog::storage::MemoryPreferenceStore;
use techblog::ui::{Page, ThemePreference};
use techblog::worker::ContentWorker;

fn blog() -> StaticSource {
    StaticSource::default()
        .with(
            "3",
            "---\ntitle: Learning Rust\ndate: 2025-03-01\ntags: [Rust]\n---\nOwnership first.",
        )
        .with(
            "5",
            "---\ntitle: Optimizing React Performance\ndate: 2025-04-05\ntags: [B, Frontend]\n---\nMemo all the things.",
        )
        .with(
            "7",
            "---\ntitle: Seven\ndate: 2025-04-12\ntags: [A]\n---\nSeventh post.",
        )
}

fn runtime_with(source: impl ContentSource + 'static, href: &str) -> Runtime<MemoryHost> {
    let worker = ContentWorker::new(Box::new(source), Box::new(MemoryPreferenceStore::default()));
    Runtime::new(
        AppState::new(ThemePreference::default()),
        worker,
        MemoryHost::at(href),
    )
}

/// Mounts at `href` and lets the first load finish.
fn mounted(href: &str) -> Runtime<MemoryHost> {
    let mut rt = runtime_with(blog(), href);
    rt.dispatch(Event::Mount { href: href.to_string() }, 0);
    rt.run_worker(0);
    rt
}

fn error_messages(rt: &Runtime<MemoryHost>) -> Vec<String> {
    rt.state()
        .notifications
        .in_channel(Channel::Alert)
        .map(|n| n.message.clone())
        .collect()
}

#[test]
fn deep_link_opens_the_article() {
    let rt = mounted("/post/7");

    assert_eq!(rt.state().router.selection(), Selection::Viewing(7));
    assert_eq!(rt.host().location(), "/post/7");
    assert_eq!(rt.host().scrolls, 1);
    assert!(error_messages(&rt).is_empty());
    match rt.view().page {
        Page::Article(detail) => assert_eq!(detail.content, "Seventh post."),
        Page::List => panic!("expected the article page"),
    }
}

#[test]
fn unknown_article_falls_back_to_list_with_one_error() {
    let rt = mounted("/post/999999");

    assert_eq!(rt.state().router.selection(), Selection::List);
    assert_eq!(rt.host().location(), "/");
    assert_eq!(error_messages(&rt), vec!["Post with ID 999999 not found"]);
    assert_eq!(rt.view().page, Page::List);
}

#[test]
fn non_numeric_article_token_is_a_miss() {
    let rt = mounted("/post/hello");

    assert_eq!(rt.state().router.selection(), Selection::List);
    assert_eq!(error_messages(&rt), vec!["Post with ID hello not found"]);
}

#[test]
fn legacy_redirect_is_rewritten_in_place() {
    let mut rt = mounted("/?/post/3");

    assert_eq!(rt.host().history, vec!["/post/3"]);
    assert_eq!(rt.state().router.selection(), Selection::Viewing(3));
    let queued = rt.state().notifications.len();

    // The host reports the rewritten address back.
    rt.dispatch(Event::LocationChanged { href: "/post/3".into() }, 20);

    assert_eq!(rt.host().history, vec!["/post/3"]);
    assert_eq!(rt.host().scrolls, 1);
    assert_eq!(rt.state().notifications.len(), queued);
    assert!(error_messages(&rt).is_empty());
    assert_eq!(rt.state().router.selection(), Selection::Viewing(3));
}

#[test]
fn selection_waits_for_the_collection() {
    let mut rt = runtime_with(blog(), "/post/5");
    rt.dispatch(Event::Mount { href: "/post/5".into() }, 0);

    assert!(rt.view().loading);
    assert_eq!(rt.state().router.pending(), Some("5"));
    assert_eq!(rt.state().router.selection(), Selection::List);
    assert!(error_messages(&rt).is_empty());

    rt.run_worker(40);

    assert_eq!(rt.state().router.pending(), None);
    assert_eq!(rt.state().router.selection(), Selection::Viewing(5));
}

#[test]
fn not_found_parameter_reports_the_path_and_shows_the_list() {
    let rt = mounted("/?notFound=%2Fabout%2Fme");

    assert_eq!(rt.host().location(), "/");
    assert_eq!(error_messages(&rt), vec!["Page not found: /about/me"]);
    assert_eq!(rt.state().router.selection(), Selection::List);
}

#[test]
fn select_back_and_browser_history() {
    let mut rt = mounted("/");

    rt.dispatch(Event::SelectArticle { id: 3 }, 100);
    assert_eq!(rt.host().location(), "/post/3");
    assert_eq!(rt.state().router.selection(), Selection::Viewing(3));

    // Selecting the article already shown is a no-op.
    assert!(!rt.dispatch(Event::SelectArticle { id: 3 }, 120));
    assert_eq!(rt.host().history.len(), 2);

    rt.dispatch(Event::Back, 200);
    assert_eq!(rt.host().history, vec!["/", "/post/3", "/"]);
    assert_eq!(rt.state().router.selection(), Selection::List);

    // Browser back button.
    rt.dispatch(Event::LocationChanged { href: "/post/3".into() }, 300);
    assert_eq!(rt.state().router.selection(), Selection::Viewing(3));
}

#[test]
fn tag_filter_keeps_matching_articles() {
    let mut rt = mounted("/");

    rt.dispatch(Event::ToggleTag("A".into()), 50);

    let ids: Vec<u32> = rt.view().articles.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![7]);
}

#[test]
fn search_matches_titles_case_insensitively() {
    let mut rt = mounted("/");

    rt.dispatch(Event::SetSearchQuery("react".into()), 50);

    let titles: Vec<String> = rt.view().articles.into_iter().map(|a| a.title).collect();
    assert_eq!(titles, vec!["Optimizing React Performance"]);
}

#[test]
fn clearing_filters_restores_the_collection_and_says_so() {
    let mut rt = mounted("/");
    rt.dispatch(Event::ToggleTag("Rust".into()), 50);
    rt.dispatch(Event::SetSearchQuery("nothing matches".into()), 60);
    assert!(rt.view().articles.is_empty());

    rt.dispatch(Event::ClearFilters, 70);

    let view = rt.view();
    assert_eq!(view.articles.len(), 3);
    assert!(!view.filters_active);
    assert!(rt
        .state()
        .notifications
        .iter()
        .any(|n| n.kind == NotificationKind::Info));
}

#[test]
fn notification_expires_after_a_hidden_phase() {
    let mut rt = mounted("/post/999999");

    rt.advance_to(2_999);
    let error = rt
        .state()
        .notifications
        .in_channel(Channel::Alert)
        .next()
        .expect("error is still queued");
    assert!(error.is_visible());

    rt.advance_to(3_000);
    let error = rt
        .state()
        .notifications
        .in_channel(Channel::Alert)
        .next()
        .expect("hidden entries stay queued during the exit phase");
    assert!(error.is_hidden());
    assert!(rt.view().alerts.iter().all(|item| !item.visible));

    rt.advance_to(3_300);
    assert!(rt.state().notifications.is_empty());
}

#[test]
fn stale_load_results_are_discarded() {
    let mut rt = runtime_with(blog(), "/");
    rt.dispatch(Event::Mount { href: "/".into() }, 0);
    rt.dispatch(Event::Reload, 5);
    assert_eq!(rt.pending_messages(), 2);

    rt.run_worker(10);

    let successes = rt
        .state()
        .notifications
        .iter()
        .filter(|n| n.kind == NotificationKind::Success)
        .count();
    assert_eq!(successes, 1);
    assert!(rt.state().store.is_ready());
}

#[test]
fn failed_reload_returns_an_open_article_to_the_list() {
    let root = tempfile::TempDir::new().unwrap();
    let posts = root.path().join("posts");
    std::fs::create_dir_all(&posts).unwrap();
    std::fs::write(posts.join("8.md"), "---\ntitle: Eight\ndate: 2025-08-01\n---\nbody").unwrap();

    let mut rt = runtime_with(DirectorySource::new(&posts), "/post/8");
    rt.dispatch(Event::Mount { href: "/post/8".into() }, 0);
    rt.run_worker(0);
    assert_eq!(rt.state().router.selection(), Selection::Viewing(8));

    std::fs::remove_dir_all(&posts).unwrap();
    rt.dispatch(Event::Reload, 100);
    rt.run_worker(100);

    assert!(rt.view().error.is_some());
    assert_eq!(rt.state().router.selection(), Selection::List);
    assert_eq!(rt.host().location(), "/");
    assert_eq!(rt.view().page, Page::List);
    assert_eq!(error_messages(&rt), vec![LOAD_FAILURE_MESSAGE]);
}

#[test]
fn failed_load_raises_a_sticky_error() {
    let mut rt = runtime_with(DirectorySource::new("/nonexistent/techblog/posts"), "/");
    rt.dispatch(Event::Mount { href: "/".into() }, 0);
    rt.run_worker(0);

    assert!(rt.view().error.is_some());
    assert_eq!(error_messages(&rt), vec![LOAD_FAILURE_MESSAGE]);

    rt.advance_to(60_000);
    assert_eq!(error_messages(&rt), vec![LOAD_FAILURE_MESSAGE]);

    let id = rt.state().notifications.iter().next().map(|n| n.id).unwrap();
    rt.dispatch(Event::DismissNotification(id), 60_000);
    rt.advance_to(60_300);
    assert!(rt.state().notifications.is_empty());
}
