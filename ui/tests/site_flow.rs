//! End-to-end flows over the in-memory document: the site app receives
//! interactions the way the browser runtime would deliver them, and
//! deferred work is fired in timer order.

use ui::core::config::SiteConfig;
use ui::dom::fixture::site_document;
use ui::dom::{Dom, MemoryDom, MemoryNode, Viewport};
use ui::i18n::{self, Lang, CHROME_KEYS};
use ui::motion::{hero, photos, seam, testimonials};
use ui::site::{
    site_registry, Deferred, Interaction, PageKey, PageRegistry, Response, ShowOutcome, SiteApp,
    Task, ViewState,
};

type App = SiteApp<MemoryDom>;

fn booted_with(registry: PageRegistry) -> (App, Vec<Deferred>) {
    let mut app = SiteApp::new(site_document(), registry, SiteConfig::default());
    let deferred = app.start();
    (app, deferred)
}

fn booted() -> (App, Vec<Deferred>) {
    booted_with(site_registry())
}

/// Fire `queue` and every follow-up in the order browser timers would.
fn drain(app: &mut App, queue: Vec<Deferred>) {
    let mut pending: Vec<(u64, usize, Deferred)> = Vec::new();
    let mut seq = 0usize;
    let mut push = |pending: &mut Vec<(u64, usize, Deferred)>, now: u64, work: Deferred| {
        pending.push((now + u64::from(work.delay_ms), seq, work));
        seq += 1;
    };
    for work in queue {
        push(&mut pending, 0, work);
    }
    while !pending.is_empty() {
        pending.sort_by_key(|(at, seq, _)| (*at, *seq));
        let (now, _, work) = pending.remove(0);
        for follow_up in app.fire(work) {
            push(&mut pending, now, follow_up);
        }
    }
}

fn click(app: &mut App, target: MemoryNode) -> Response {
    app.handle(Interaction::Click { target })
}

fn node(app: &App, selector: &str) -> MemoryNode {
    app.dom()
        .query(selector)
        .unwrap_or_else(|| panic!("fixture lacks {selector}"))
}

fn nav_link(app: &App, page: PageKey) -> MemoryNode {
    node(app, &format!(r#".nav-link[data-page="{page}"]"#))
}

fn lang_button(app: &App, lang: Lang) -> MemoryNode {
    node(app, &format!(r#".lang-btn[data-lang="{lang}"]"#))
}

fn active_views(app: &App) -> Vec<String> {
    let dom = app.dom();
    dom.query_all(".page.active")
        .iter()
        .filter_map(|view| dom.attr(view, "id"))
        .collect()
}

fn navigate(app: &mut App, page: PageKey) -> Vec<Deferred> {
    let link = nav_link(app, page);
    let response = click(app, link);
    assert!(response.prevent_default);
    response.deferred
}

#[test]
fn boot_shows_english_home() {
    let (app, deferred) = booted();
    assert_eq!(active_views(&app), vec!["home-page"]);
    assert_eq!(app.controller().state(), ViewState::default());
    assert_eq!(app.dom().title(), i18n::text(Lang::En, "page-title"));

    let tasks: Vec<Task> = deferred.iter().map(|d| d.task).collect();
    assert!(tasks.contains(&Task::ArmHome));
    assert!(tasks.contains(&Task::Entrance));
    assert!(!tasks.contains(&Task::EmbedFix));
}

#[test]
fn every_valid_pair_leaves_exactly_one_active_view() {
    let (mut app, _) = booted();
    let registry = site_registry();
    for page in PageKey::ALL {
        for lang in Lang::ALL {
            let outcome = app.controller_mut().show_page(page, Some(lang));
            assert!(outcome.is_shown(), "{page}/{lang}");
            let expected = registry.view_id(page, lang).unwrap();
            assert_eq!(active_views(&app), vec![expected], "{page}/{lang}");
            assert_eq!(app.controller().state(), ViewState { page, lang });
        }
    }
}

#[test]
fn chrome_follows_the_resulting_language() {
    let (mut app, _) = booted();
    for lang in [Lang::De, Lang::En, Lang::De] {
        app.controller_mut().show_page(PageKey::Biography, Some(lang));
        let dom = app.dom();
        for key in &CHROME_KEYS[2..] {
            let slot = dom.by_id(key).unwrap();
            assert_eq!(dom.text(&slot), i18n::text(lang, key), "{lang}: {key}");
        }
        let meta = dom.query(r#"meta[name="description"]"#).unwrap();
        assert_eq!(
            dom.attr(&meta, "content").as_deref(),
            Some(i18n::text(lang, "page-description").as_str())
        );
        assert_eq!(dom.title(), i18n::text(lang, "page-title"));
    }
}

#[test]
fn unregistered_pair_is_ignored_and_triggers_survive() {
    let registry = PageRegistry::empty().with(PageKey::Home, Lang::En, "home-page");
    let (mut app, deferred) = booted_with(registry);
    drain(&mut app, deferred);
    let armed = app.controller().triggers().len();
    let token = app.controller().token();
    assert!(armed > 0);

    let outcome = app.controller_mut().show_page(PageKey::Booking, Some(Lang::En));
    assert_eq!(outcome, ShowOutcome::Ignored);
    assert_eq!(active_views(&app), vec!["home-page"]);
    assert_eq!(app.controller().triggers().len(), armed);
    assert_eq!(app.controller().token(), token);

    // Switching to a language without a view is ignored the same way.
    let de = lang_button(&app, Lang::De);
    let response = click(&mut app, de);
    assert!(response.deferred.is_empty());
    assert_eq!(app.controller().state().lang, Lang::En);
}

#[test]
fn home_arms_one_generation_of_bindings() {
    let (mut app, deferred) = booted();
    drain(&mut app, deferred);
    let triggers = app.controller().triggers();
    assert_eq!(triggers.count(hero::GROUP), 1);
    assert_eq!(triggers.count(photos::GROUP), 3);
    assert_eq!(triggers.count(seam::GROUP), 1);
    assert_eq!(triggers.count(testimonials::GROUP), 0);
    assert_eq!(triggers.len(), 5);
}

#[test]
fn showing_home_twice_does_not_duplicate_bindings() {
    let (mut app, first) = booted();
    let second = app
        .controller_mut()
        .show_page(PageKey::Home, Some(Lang::En))
        .into_deferred();
    let mut all = first;
    all.extend(second);
    drain(&mut app, all);

    assert_eq!(active_views(&app), vec!["home-page"]);
    let triggers = app.controller().triggers();
    assert_eq!(triggers.count(hero::GROUP), 1);
    assert_eq!(triggers.count(photos::GROUP), 3);
    assert_eq!(triggers.len(), 5);
}

#[test]
fn stale_work_from_a_previous_view_is_dropped() {
    let (mut app, home_work) = booted();
    let bio_work = navigate(&mut app, PageKey::Biography);

    drain(&mut app, home_work);
    assert!(app.controller().triggers().is_empty());
    let bubble = node(&app, "#home-page .bubble");
    assert_eq!(app.dom().style(&bubble, "transform"), None);

    drain(&mut app, bio_work);
    let dom = app.dom();
    for section in dom.query_all("#biography-page .text-section") {
        assert!(dom.has_class(&section, "is-visible"));
    }
}

#[test]
fn nav_links_track_the_current_page() {
    let (mut app, _) = booted();
    navigate(&mut app, PageKey::Testimonials);
    let dom = app.dom();
    assert!(dom.has_class(&nav_link(&app, PageKey::Testimonials), "active"));
    assert!(!dom.has_class(&nav_link(&app, PageKey::Home), "active"));
    assert_eq!(active_views(&app), vec!["testimonials-page"]);
}

#[test]
fn language_toggle_keeps_the_page() {
    let (mut app, _) = booted();
    navigate(&mut app, PageKey::Booking);
    let de = lang_button(&app, Lang::De);
    let deferred = click(&mut app, de).deferred;

    assert_eq!(active_views(&app), vec!["booking-de-page"]);
    assert!(deferred.iter().any(|d| d.task == Task::EmbedFix));
    let dom = app.dom();
    let body = dom.body().unwrap();
    assert!(dom.has_class(&body, "booking-page"));
    assert_eq!(dom.attr(&de, "aria-pressed").as_deref(), Some("true"));
    assert!(dom.has_class(&de, "active"));
    let en = lang_button(&app, Lang::En);
    assert_eq!(dom.attr(&en, "aria-pressed").as_deref(), Some("false"));
    let current = dom.by_id("current-language").unwrap();
    assert_eq!(dom.text(&current), "Deutsch");

    navigate(&mut app, PageKey::Home);
    assert_eq!(active_views(&app), vec!["home-de-page"]);
    let body = app.dom().body().unwrap();
    assert!(!app.dom().has_class(&body, "booking-page"));
}

#[test]
fn german_home_arms_the_german_sequence() {
    let (mut app, _) = booted();
    let de = lang_button(&app, Lang::De);
    let deferred = click(&mut app, de).deferred;
    drain(&mut app, deferred);

    let dom = app.dom();
    let photo = node(&app, "#photo1-de");
    assert_eq!(dom.style(&photo, "opacity").as_deref(), Some("0"));
    let english = node(&app, "#photo1");
    assert_eq!(dom.style(&english, "opacity"), None);
    assert_eq!(app.controller().triggers().count(photos::GROUP), 3);
}

#[test]
fn scrolling_drives_the_hero() {
    let (mut app, deferred) = booted();
    drain(&mut app, deferred);
    let bubble = node(&app, "#home-page .bubble");
    let before = app.dom().style(&bubble, "transform");

    app.dom().scroll_to(800.0);
    app.handle(Interaction::Scroll);
    let after = app.dom().style(&bubble, "transform");
    assert!(after.is_some());
    assert_ne!(before, after);
}

#[test]
fn load_rearms_photos_only_on_home() {
    let (mut app, deferred) = booted();
    drain(&mut app, deferred);
    let response = app.handle(Interaction::Load);
    assert_eq!(response.deferred.len(), 1);
    assert_eq!(response.deferred[0].task, Task::RearmPhotos);
    drain(&mut app, response.deferred);
    assert_eq!(app.controller().triggers().count(photos::GROUP), 3);

    navigate(&mut app, PageKey::Biography);
    assert!(app.handle(Interaction::Load).deferred.is_empty());
}

#[test]
fn narrow_viewports_get_a_scrollable_calendar() {
    let (mut app, _) = booted();
    app.dom().set_viewport(Viewport {
        width: 390.0,
        height: 844.0,
    });
    let deferred = navigate(&mut app, PageKey::Booking);
    drain(&mut app, deferred);
    let embed = node(&app, ".cal-embed");
    assert_eq!(app.dom().style(&embed, "height").as_deref(), Some("600px"));
    assert_eq!(app.dom().style(&embed, "overflow-y").as_deref(), Some("auto"));
}

#[test]
fn resize_refreshes_the_viewport_unit() {
    let (mut app, _) = booted();
    app.dom().set_viewport(Viewport {
        width: 1280.0,
        height: 500.0,
    });
    app.handle(Interaction::Resize);
    let root = app.dom().root().unwrap();
    assert_eq!(app.dom().style(&root, "--vh").as_deref(), Some("5px"));
}

#[test]
fn frames_fade_in_once_loaded() {
    let (mut app, _) = booted();
    let frame = node(&app, "iframe");
    assert_eq!(app.dom().style(&frame, "opacity").as_deref(), Some("0.5"));
    app.handle(Interaction::FrameLoaded { frame });
    assert_eq!(app.dom().style(&frame, "opacity").as_deref(), Some("1"));
}

#[test]
fn anchor_links_scroll_smoothly() {
    let (mut app, _) = booted();
    navigate(&mut app, PageKey::Test);
    let link = node(&app, r##"a[href="#contact"]"##);
    let response = click(&mut app, link);
    assert!(response.prevent_default);
    assert_eq!(app.dom().scroll_y(), 6000.0);
}

#[test]
fn failed_writes_do_not_abort_a_transition() {
    let (mut app, _) = booted();
    let rights = app.dom().by_id("footer-rights").unwrap();
    app.dom().fail_writes(&rights);

    let outcome = app.controller_mut().show_page(PageKey::Biography, Some(Lang::De));
    assert!(outcome.is_shown());
    assert_eq!(active_views(&app), vec!["biography-de-page"]);
    let contact = app.dom().by_id("footer-contact-title").unwrap();
    assert_eq!(
        app.dom().text(&contact),
        i18n::text(Lang::De, "footer-contact-title")
    );
}

#[test]
fn a_view_that_refuses_activation_keeps_the_current_one() {
    let (mut app, deferred) = booted();
    drain(&mut app, deferred);
    let armed = app.controller().triggers().len();
    let token = app.controller().token();
    let booking = app.dom().by_id("booking-page").unwrap();
    app.dom().fail_writes(&booking);

    let outcome = app.controller_mut().show_page(PageKey::Booking, Some(Lang::En));
    assert_eq!(outcome, ShowOutcome::Ignored);
    assert_eq!(active_views(&app), vec!["home-page"]);
    assert_eq!(app.controller().state(), ViewState::default());
    assert_eq!(app.controller().token(), token);
    assert_eq!(app.controller().triggers().len(), armed);
    assert!(app.dom().has_class(&nav_link(&app, PageKey::Home), "active"));
}

#[test]
fn a_view_that_cannot_be_hidden_rolls_back_the_swap() {
    let (mut app, _) = booted();
    let token = app.controller().token();
    // Home is stripped first, then this one refuses.
    let biography = app.dom().by_id("biography-page").unwrap();
    app.dom().fail_writes(&biography);

    let outcome = app.controller_mut().show_page(PageKey::Booking, Some(Lang::En));
    assert_eq!(outcome, ShowOutcome::Ignored);
    assert_eq!(active_views(&app), vec!["home-page"]);
    assert_eq!(app.controller().token(), token);
}

#[test]
fn leaving_home_hides_the_seam_band() {
    let (mut app, deferred) = booted();
    drain(&mut app, deferred);
    let band = node(&app, ".apple-blur-overlay");
    app.dom().scroll_to(2000.0);
    app.handle(Interaction::Scroll);
    assert!(app.dom().has_class(&band, "show"));

    navigate(&mut app, PageKey::Booking);
    assert!(app.controller().triggers().is_empty());
    assert!(!app.dom().has_class(&band, "show"));
}

#[test]
fn nav_links_match_the_exact_page_key() {
    let (mut app, _) = booted();
    let nav = node(&app, "nav.navbar");
    let german = app
        .dom()
        .el(nav, "a")
        .class("nav-link")
        .attr("data-page", "booking-de")
        .node();

    for lang in Lang::ALL {
        app.controller_mut().show_page(PageKey::Booking, Some(lang));
        assert!(app.dom().has_class(&nav_link(&app, PageKey::Booking), "active"));
        assert!(!app.dom().has_class(&german, "active"), "{lang}");
    }
}

fn fill(app: &App, lang: Lang, name: &str, email: &str, experience: &str) -> MemoryNode {
    let suffix = if lang == Lang::De { "-de" } else { "" };
    let dom = app.dom();
    for (field, value) in [("fullName", name), ("email", email), ("experience", experience)] {
        let input = dom.by_id(&format!("{field}{suffix}")).unwrap();
        dom.set_value(&input, value);
    }
    dom.by_id(&format!("booking-form{suffix}")).unwrap()
}

#[test]
fn invalid_booking_request_shows_messages() {
    let (mut app, _) = booted();
    navigate(&mut app, PageKey::Booking);
    let form = fill(&app, Lang::En, "  ", "not-an-email", "");
    let response = app.handle(Interaction::Submit { form });
    assert!(response.prevent_default);

    let dom = app.dom();
    let text = |id: &str| dom.text(&dom.by_id(id).unwrap());
    assert_eq!(text("fullName-error"), i18n::text(Lang::En, "form-error-name-required"));
    assert_eq!(text("email-error"), i18n::text(Lang::En, "form-error-email-invalid"));
    assert_eq!(
        text("experience-error"),
        i18n::text(Lang::En, "form-error-experience-required")
    );
    assert!(dom.notifications().is_empty());
}

#[test]
fn valid_german_request_is_confirmed_and_reset() {
    let (mut app, _) = booted();
    navigate(&mut app, PageKey::Booking);
    let form = fill(&app, Lang::De, "", "", "");
    app.handle(Interaction::Submit { form });
    let dom = app.dom();
    let error = dom.by_id("email-de-error").unwrap();
    assert_eq!(dom.text(&error), i18n::text(Lang::De, "form-error-email-required"));

    let form = fill(&app, Lang::De, "Jana", "jana@example.at", "advanced");
    let response = app.handle(Interaction::Submit { form });
    assert!(response.prevent_default);

    let dom = app.dom();
    assert_eq!(dom.notifications(), vec![i18n::text(Lang::De, "form-success")]);
    assert_eq!(dom.text(&error), "");
    let name = dom.by_id("fullName-de").unwrap();
    assert_eq!(dom.value(&name), "");
}

#[test]
fn unrelated_forms_keep_their_default_action() {
    let (mut app, _) = booted();
    let body = app.dom().body_node();
    let search = app.dom().el(body, "form").id("search").node();
    let response = app.handle(Interaction::Submit { form: search });
    assert!(!response.prevent_default);
}

fn open_card(app: &mut App, title: &str) -> MemoryNode {
    navigate(app, PageKey::Test);
    let card = node(app, &format!(r#".expand-card[data-title="{title}"]"#));
    let heading = app.dom().query_in(&card, "h3").unwrap();
    let opened = click(app, heading).deferred;
    assert_eq!(
        opened.iter().map(|d| d.task).collect::<Vec<_>>(),
        vec![Task::ExpandGrow]
    );
    drain(app, opened);
    card
}

#[test]
fn expand_card_opens_and_escape_restores_it() {
    let (mut app, _) = booted();
    let card = node(&app, r#".expand-card[data-title="Concert"]"#);
    let markup = app.dom().inner_html(&card);
    open_card(&mut app, "Concert");

    let clone = node(&app, ".expand-clone");
    assert!(app.dom().inner_html(&clone).contains("Concert"));
    assert_eq!(app.dom().style(&card, "opacity").as_deref(), Some("0"));
    let dim = app.dom().by_id("expand-dim").unwrap();
    assert!(app.dom().has_class(&dim, "active"));

    let closing = app.handle(Interaction::Key {
        key: "Escape".into(),
    });
    assert_eq!(
        closing.deferred,
        vec![Deferred::always(500, Task::ExpandSettle)]
    );
    assert!(app.expand_card().is_active());
    drain(&mut app, closing.deferred);

    let dom = app.dom();
    assert!(!app.expand_card().is_active());
    assert!(!dom.is_attached(&clone));
    assert_eq!(dom.style(&card, "opacity"), None);
    assert_eq!(dom.inner_html(&card), markup);
    assert!(!dom.has_class(&dim, "active"));
}

#[test]
fn clicking_elsewhere_collapses_without_opening_another_card() {
    let (mut app, _) = booted();
    open_card(&mut app, "Rehearsal");

    // Inside the clone nothing happens.
    let clone = node(&app, ".expand-clone");
    assert!(click(&mut app, clone).deferred.is_empty());
    assert!(app.expand_card().is_open());

    let other = node(&app, r#".expand-card[data-title="Concert"]"#);
    let response = click(&mut app, other);
    assert_eq!(
        response.deferred.iter().map(|d| d.task).collect::<Vec<_>>(),
        vec![Task::ExpandSettle]
    );
    assert_eq!(app.dom().query_all(".expand-clone").len(), 1);
    drain(&mut app, response.deferred);
    assert!(app.dom().query(".expand-clone").is_none());
    assert_eq!(app.dom().style(&other, "opacity"), None);
}

#[test]
fn a_card_that_cannot_be_covered_leaves_no_clone() {
    let (mut app, _) = booted();
    navigate(&mut app, PageKey::Test);
    let card = node(&app, r#".expand-card[data-title="Concert"]"#);
    app.dom().fail_writes(&card);
    let heading = app.dom().query_in(&card, "h3").unwrap();

    for _ in 0..2 {
        let response = click(&mut app, heading);
        assert!(response.deferred.is_empty());
    }
    assert!(app.dom().query(".expand-clone").is_none());
    assert!(!app.expand_card().is_active());
    let dim = app.dom().by_id("expand-dim").unwrap();
    assert!(!app.dom().has_class(&dim, "active"));
}

#[test]
fn bubble_overlay_speaks_the_current_language() {
    let (mut app, _) = booted();
    let de = lang_button(&app, Lang::De);
    click(&mut app, de);
    navigate(&mut app, PageKey::Test);
    assert_eq!(active_views(&app), vec!["test-page"]);

    let item = node(&app, r#".bubble-item[data-category="chamber"]"#);
    click(&mut app, item);
    let dom = app.dom();
    let overlay = dom.by_id("bubbleOverlay").unwrap();
    assert!(dom.has_class(&overlay, "active"));
    let title = node(&app, ".overlay-title");
    assert_eq!(dom.text(&title), i18n::text(Lang::De, "bubble-chamber-title"));
    let body = dom.body().unwrap();
    assert_eq!(dom.style(&body, "overflow").as_deref(), Some("hidden"));

    // Clicks on the panel itself keep it open; the backdrop closes it.
    click(&mut app, title);
    assert!(app.dom().has_class(&overlay, "active"));
    click(&mut app, overlay);
    assert!(!app.dom().has_class(&overlay, "active"));
    assert_eq!(app.dom().style(&body, "overflow"), None);

    let item = node(&app, r#".bubble-item[data-category="vocal"]"#);
    click(&mut app, item);
    app.handle(Interaction::Key {
        key: "Escape".into(),
    });
    assert!(!app.dom().has_class(&overlay, "active"));
}
