use super::*;
use brew::DrawCommand;

const TICK: Duration = Duration::from_nanos(16_666_667);

fn started() -> (NarrativeEngine, Screen) {
    let mut engine = NarrativeEngine::new();
    let mut screen = Screen::new();
    engine.start(&mut screen);
    (engine, screen)
}

fn advance_ms(engine: &mut NarrativeEngine, screen: &mut Screen, millis: u64) {
    engine.advance(Duration::from_millis(millis), screen);
}

fn advance_in_ticks(engine: &mut NarrativeEngine, screen: &mut Screen, total: Duration) {
    let mut elapsed = Duration::ZERO;
    while elapsed + TICK <= total {
        engine.advance(TICK, screen);
        elapsed += TICK;
    }
    if elapsed < total {
        engine.advance(total - elapsed, screen);
    }
}

fn at_choices() -> (NarrativeEngine, Screen) {
    let (mut engine, mut screen) = started();
    advance_ms(&mut engine, &mut screen, 15_000);
    assert_eq!(engine.state(), NarrativeState::Choices);
    (engine, screen)
}

fn images(screen: &Screen) -> Vec<String> {
    screen.image_keys().map(str::to_string).collect()
}

fn texts(screen: &Screen) -> Vec<String> {
    screen.texts().map(str::to_string).collect()
}

fn display_list(screen: &Screen) -> Vec<DrawCommand> {
    screen.display_list().cloned().collect()
}

fn image_at(screen: &Screen, wanted: &str) -> Option<(f32, f32)> {
    screen.display_list().find_map(|command| match command {
        DrawCommand::Image { key, position } if key == wanted => Some((position.x, position.y)),
        _ => None,
    })
}

#[test]
fn start_shows_logo() {
    let (engine, screen) = started();
    assert_eq!(engine.state(), NarrativeState::Logo);
    assert_eq!(images(&screen), vec!["logo"]);
    assert_eq!(image_at(&screen, "logo"), Some((1.0, 50.0)));
}

#[test]
fn timers_alone_walk_to_choices_and_stall() {
    let (mut engine, mut screen) = started();

    advance_ms(&mut engine, &mut screen, 1_999);
    assert_eq!(engine.state(), NarrativeState::Logo);
    advance_ms(&mut engine, &mut screen, 1);
    assert_eq!(engine.state(), NarrativeState::Instructions);

    advance_ms(&mut engine, &mut screen, 3_000);
    assert_eq!(engine.state(), NarrativeState::TaleAboutTheRat);

    advance_ms(&mut engine, &mut screen, 10_000);
    assert_eq!(engine.state(), NarrativeState::Choices);

    advance_ms(&mut engine, &mut screen, 600_000);
    assert_eq!(engine.state(), NarrativeState::Choices);
    assert_eq!(engine.pending_timers(), 0);
}

#[test]
fn instructions_screen_lists_the_backdrop_keys() {
    let (mut engine, mut screen) = started();
    advance_ms(&mut engine, &mut screen, 2_000);

    assert_eq!(
        texts(&screen),
        vec![
            "Instructions:",
            "Press 1,2,3 to",
            "change landscape",
            "Press 4,5,6 to",
            "change the wall",
        ]
    );
    assert!(matches!(
        &screen.commands()[0],
        DrawCommand::BoldLabel { position, .. } if position.x == 10.0 && position.y == 30.0
    ));
    assert!(images(&screen).is_empty());
}

#[test]
fn tale_draws_stage_then_dialogue() {
    let (mut engine, mut screen) = started();
    advance_ms(&mut engine, &mut screen, 5_000);

    assert_eq!(engine.state(), NarrativeState::TaleAboutTheRat);
    assert_eq!(images(&screen), vec!["back0", "wall0", "hamlet", "gertrude"]);
    assert_eq!(image_at(&screen, "back0"), Some((85.0, 25.0)));
    assert_eq!(image_at(&screen, "wall0"), Some((0.0, 0.0)));
    assert_eq!(image_at(&screen, "hamlet"), Some((21.0, 42.0)));
    assert_eq!(image_at(&screen, "gertrude"), Some((53.0, 27.0)));
    assert_eq!(texts(&screen), vec![TALE_TEXT]);
}

#[test]
fn choices_shows_an_active_menu_at_cursor_zero() {
    let (_engine, screen) = at_choices();

    let placed = screen.placed_menu().expect("menu");
    assert_eq!(placed.y, 85.0);
    assert_eq!(placed.widget.title(), "Who does Hamlet Kill?");
    assert_eq!(placed.widget.items(), ["Polonius", "Kenny", "Splinter"]);
    assert_eq!(placed.widget.current_index(), 0);
    assert!(placed.widget.is_active());
}

#[test]
fn menu_navigation_saturates_at_both_ends() {
    let (mut engine, mut screen) = at_choices();

    engine.handle_key(LogicalKey::ArrowUp, &mut screen);
    assert_eq!(screen.menu().expect("menu").current_index(), 0);

    for _ in 0..5 {
        engine.handle_key(LogicalKey::ArrowDown, &mut screen);
    }
    assert_eq!(screen.menu().expect("menu").current_index(), 2);

    engine.handle_key(LogicalKey::ArrowUp, &mut screen);
    assert_eq!(screen.menu().expect("menu").current_index(), 1);
    assert_eq!(engine.state(), NarrativeState::Choices);
}

#[test]
fn commit_enters_stabbing_synchronously() {
    let (mut engine, mut screen) = at_choices();
    engine.handle_key(LogicalKey::Ok, &mut screen);

    assert_eq!(engine.state(), NarrativeState::Stabbing);
    assert_eq!(engine.kill_choice(), KillChoice::Polonius);
    assert!(screen.menu().is_none());
    assert_eq!(texts(&screen), vec![STABBING_TEXT]);
    assert_eq!(
        images(&screen),
        vec!["back0", "wall0", "hamlet", "gertrude", "sword1"]
    );
    assert_eq!(image_at(&screen, "sword1"), Some((5.0, 52.0)));
}

#[test]
fn arrow_keys_before_choices_do_nothing() {
    let (mut engine, mut screen) = started();
    advance_ms(&mut engine, &mut screen, 5_000);
    let before = display_list(&screen);

    engine.handle_key(LogicalKey::ArrowDown, &mut screen);
    engine.handle_key(LogicalKey::Ok, &mut screen);
    engine.handle_key(LogicalKey::Unknown, &mut screen);

    assert_eq!(engine.state(), NarrativeState::TaleAboutTheRat);
    assert_eq!(display_list(&screen), before);
}

#[test]
fn sword_frames_follow_half_second_steps() {
    let (mut engine, mut screen) = at_choices();
    engine.handle_key(LogicalKey::Ok, &mut screen);

    advance_ms(&mut engine, &mut screen, 499);
    assert!(!images(&screen).contains(&"sword2".to_string()));
    advance_ms(&mut engine, &mut screen, 1);
    assert!(images(&screen).contains(&"sword2".to_string()));

    advance_ms(&mut engine, &mut screen, 500);
    let shown = images(&screen);
    let sword_frames: Vec<&str> = shown
        .iter()
        .map(String::as_str)
        .filter(|key| key.starts_with("sword"))
        .collect();
    assert_eq!(sword_frames, vec!["sword3"]);
    assert_eq!(texts(&screen), vec![STABBING_TEXT]);
    assert_eq!(engine.state(), NarrativeState::Stabbing);
}

#[test]
fn choosing_kenny_carries_through_reveal_and_conclusion() {
    let (mut engine, mut screen) = at_choices();
    engine.handle_key(LogicalKey::ArrowDown, &mut screen);
    engine.handle_key(LogicalKey::Ok, &mut screen);
    assert_eq!(engine.kill_choice(), KillChoice::Kenny);

    engine.handle_key(LogicalKey::Num3, &mut screen);
    engine.handle_key(LogicalKey::Num6, &mut screen);

    advance_ms(&mut engine, &mut screen, 3_000);
    assert_eq!(engine.state(), NarrativeState::RatReveal);
    let reveal = texts(&screen);
    assert_eq!(reveal.len(), 1);
    assert!(reveal[0].contains("Kenny"));
    assert_eq!(image_at(&screen, "kenny1"), Some((0.0, 37.0)));

    engine.handle_key(LogicalKey::Num1, &mut screen);
    advance_ms(&mut engine, &mut screen, 500);
    let frames: Vec<String> = images(&screen)
        .into_iter()
        .filter(|key| key.starts_with("kenny"))
        .collect();
    assert_eq!(frames, vec!["kenny3"]);
    assert_eq!(image_at(&screen, "back1"), Some((85.0, 25.0)));

    advance_ms(&mut engine, &mut screen, 4_000);
    assert_eq!(engine.state(), NarrativeState::Conclusion);
    assert_eq!(texts(&screen), vec![KillChoice::Kenny.info().ending_text]);
    assert_eq!(images(&screen), vec!["stankyle"]);
}

#[test]
fn reveal_frames_use_the_short_then_longer_gap() {
    let (mut engine, mut screen) = at_choices();
    engine.handle_key(LogicalKey::ArrowDown, &mut screen);
    engine.handle_key(LogicalKey::ArrowDown, &mut screen);
    engine.handle_key(LogicalKey::Ok, &mut screen);
    advance_ms(&mut engine, &mut screen, 3_000);
    assert_eq!(engine.state(), NarrativeState::RatReveal);

    advance_ms(&mut engine, &mut screen, 199);
    assert!(image_at(&screen, "splinter2").is_none());
    advance_ms(&mut engine, &mut screen, 1);
    assert!(image_at(&screen, "splinter2").is_some());
    advance_ms(&mut engine, &mut screen, 299);
    assert!(image_at(&screen, "splinter3").is_none());
    advance_ms(&mut engine, &mut screen, 1);
    assert!(image_at(&screen, "splinter3").is_some());
}

#[test]
fn polonius_ending_restages_with_teardrops() {
    let (mut engine, mut screen) = at_choices();
    engine.handle_key(LogicalKey::Ok, &mut screen);
    advance_ms(&mut engine, &mut screen, 7_500);

    assert_eq!(engine.state(), NarrativeState::Conclusion);
    assert_eq!(texts(&screen), vec![KillChoice::Polonius.info().ending_text]);
    assert_eq!(
        images(&screen),
        vec!["back0", "wall0", "hamlet", "gertrude", "teardrops"]
    );
    assert_eq!(image_at(&screen, "teardrops"), Some((69.0, 38.0)));
}

#[test]
fn splinter_ending_shows_turtles() {
    let (mut engine, mut screen) = at_choices();
    engine.handle_key(LogicalKey::ArrowDown, &mut screen);
    engine.handle_key(LogicalKey::ArrowDown, &mut screen);
    engine.handle_key(LogicalKey::Ok, &mut screen);
    advance_ms(&mut engine, &mut screen, 7_500);

    assert_eq!(engine.state(), NarrativeState::Conclusion);
    assert_eq!(images(&screen), vec!["turtles"]);
    assert!(texts(&screen)[0].starts_with("Splinter:  Turtles"));
}

#[test]
fn conclusion_is_terminal() {
    let (mut engine, mut screen) = at_choices();
    engine.handle_key(LogicalKey::Ok, &mut screen);
    advance_ms(&mut engine, &mut screen, 7_500);
    let settled = display_list(&screen);

    advance_ms(&mut engine, &mut screen, 60_000);
    engine.handle_key(LogicalKey::Ok, &mut screen);
    engine.handle_key(LogicalKey::ArrowDown, &mut screen);

    assert_eq!(engine.state(), NarrativeState::Conclusion);
    assert_eq!(engine.pending_timers(), 0);
    assert_eq!(display_list(&screen), settled);
}

#[test]
fn pressing_num2_twice_keeps_outdoor_at_two() {
    let (mut engine, mut screen) = started();
    engine.handle_key(LogicalKey::Num2, &mut screen);
    engine.handle_key(LogicalKey::Num2, &mut screen);

    assert_eq!(engine.scene_context().outdoor_backdrop(), 2);
    assert_eq!(engine.scene_context().wall_backdrop(), 0);
}

#[test]
fn backdrop_keys_map_to_their_slots() {
    let mut context = SceneContext::default();
    assert!(context.apply_key(LogicalKey::Num3));
    assert!(context.apply_key(LogicalKey::Num4));
    assert!(!context.apply_key(LogicalKey::Ok));
    assert_eq!(context.outdoor_key(), "back3");
    assert_eq!(context.wall_key(), "wall1");

    assert!(context.apply_key(LogicalKey::Num1));
    assert!(context.apply_key(LogicalKey::Num6));
    assert_eq!((context.outdoor_backdrop(), context.wall_backdrop()), (1, 3));
}

#[test]
fn backdrop_key_outside_live_states_waits_for_next_redraw() {
    let (mut engine, mut screen) = started();
    engine.handle_key(LogicalKey::Num5, &mut screen);
    assert_eq!(images(&screen), vec!["logo"]);

    advance_ms(&mut engine, &mut screen, 5_000);
    assert_eq!(image_at(&screen, "wall2"), Some((0.0, 0.0)));
}

#[test]
fn backdrop_key_during_tale_redraws_stage_and_keeps_dialogue() {
    let (mut engine, mut screen) = started();
    advance_ms(&mut engine, &mut screen, 5_000);
    engine.handle_key(LogicalKey::Num1, &mut screen);

    assert_eq!(images(&screen), vec!["back1", "wall0", "hamlet", "gertrude"]);
    assert_eq!(texts(&screen), vec![TALE_TEXT]);
}

#[test]
fn repeated_backdrop_keys_replace_the_stage_instead_of_stacking() {
    let (mut engine, mut screen) = at_choices();
    let before = screen.display_list().count();

    for round in 0..1_000 {
        let key = if round % 2 == 0 {
            LogicalKey::Num2
        } else {
            LogicalKey::Num6
        };
        engine.handle_key(key, &mut screen);
    }

    assert_eq!(screen.display_list().count(), before);
    assert_eq!(images(&screen), vec!["back2", "wall3", "hamlet", "gertrude"]);
    assert!(screen.menu().expect("menu").is_active());
}

#[test]
fn backdrop_key_during_choices_keeps_menu_state() {
    let (mut engine, mut screen) = at_choices();
    engine.handle_key(LogicalKey::ArrowDown, &mut screen);
    engine.handle_key(LogicalKey::Num4, &mut screen);

    let menu = screen.menu().expect("menu");
    assert!(menu.is_active());
    assert_eq!(menu.current_index(), 1);
    assert_eq!(images(&screen).last().map(String::as_str), Some("gertrude"));
    assert!(images(&screen).contains(&"wall1".to_string()));
}

#[test]
fn raw_keys_never_cancel_timers() {
    let (mut engine, mut screen) = started();
    for key in LogicalKey::MAPPED {
        engine.handle_key(key, &mut screen);
        advance_ms(&mut engine, &mut screen, 100);
    }
    advance_ms(&mut engine, &mut screen, 1_100);
    assert_eq!(engine.state(), NarrativeState::Instructions);
}

#[test]
fn force_to_choices_drops_in_flight_animation() {
    let (mut engine, mut screen) = at_choices();
    engine.handle_key(LogicalKey::Ok, &mut screen);
    advance_ms(&mut engine, &mut screen, 700);
    assert_eq!(engine.state(), NarrativeState::Stabbing);

    engine.force_to_choices(&mut screen);
    assert_eq!(engine.state(), NarrativeState::Choices);
    assert!(screen.menu().expect("menu").is_active());

    advance_ms(&mut engine, &mut screen, 10_000);
    assert_eq!(engine.state(), NarrativeState::Choices);
    assert!(images(&screen).iter().all(|key| !key.starts_with("sword")));
    assert_eq!(engine.pending_timers(), 0);
}

#[test]
fn force_to_choices_from_logo_skips_the_intro() {
    let (mut engine, mut screen) = started();
    engine.force_to_choices(&mut screen);
    advance_ms(&mut engine, &mut screen, 20_000);

    assert_eq!(engine.state(), NarrativeState::Choices);
    assert!(image_at(&screen, "logo").is_none());
}

#[test]
fn replay_after_force_uses_the_new_choice() {
    let (mut engine, mut screen) = at_choices();
    engine.handle_key(LogicalKey::Ok, &mut screen);
    advance_ms(&mut engine, &mut screen, 7_500);
    assert_eq!(engine.kill_choice(), KillChoice::Polonius);

    engine.force_to_choices(&mut screen);
    engine.handle_key(LogicalKey::ArrowDown, &mut screen);
    engine.handle_key(LogicalKey::Ok, &mut screen);
    advance_ms(&mut engine, &mut screen, 7_500);

    assert_eq!(engine.state(), NarrativeState::Conclusion);
    assert_eq!(images(&screen), vec!["stankyle"]);
}

#[test]
fn unrecognized_menu_item_keeps_previous_choice() {
    let (mut engine, mut screen) = at_choices();
    engine.handle_menu_event(MenuEvent::ItemSelected("Yorick".to_string()), &mut screen);

    assert_eq!(engine.state(), NarrativeState::Stabbing);
    assert_eq!(engine.kill_choice(), KillChoice::Polonius);
}

#[test]
fn kill_choice_table_is_consistent() {
    for choice in KillChoice::ALL {
        let info = choice.info();
        assert_eq!(KillChoice::from_name(info.name), Some(choice));
        assert_eq!(info.stem, info.name.to_lowercase());
        assert!(info.reveal_text.contains(info.name));
        assert!(info.ending_text.contains("~THE END~"));
    }
    assert_eq!(KillChoice::Splinter.reveal_frame_key(2), "splinter2");
    assert_eq!(KillChoice::from_name("polonius"), None);
}

#[test]
fn end_to_end_polonius_timeline_at_sixty_hertz() {
    let (mut engine, mut screen) = started();

    advance_in_ticks(&mut engine, &mut screen, Duration::from_secs(2));
    assert_eq!(engine.state(), NarrativeState::Instructions);
    advance_in_ticks(&mut engine, &mut screen, Duration::from_secs(3));
    assert_eq!(engine.state(), NarrativeState::TaleAboutTheRat);
    advance_in_ticks(&mut engine, &mut screen, Duration::from_secs(10));
    assert_eq!(engine.state(), NarrativeState::Choices);
    assert_eq!(
        screen.menu().expect("menu").items(),
        ["Polonius", "Kenny", "Splinter"]
    );
    assert_eq!(screen.menu().expect("menu").current_index(), 0);

    engine.handle_key(LogicalKey::Ok, &mut screen);
    assert_eq!(engine.state(), NarrativeState::Stabbing);

    advance_in_ticks(&mut engine, &mut screen, Duration::from_millis(2_990));
    assert_eq!(engine.state(), NarrativeState::Stabbing);
    advance_in_ticks(&mut engine, &mut screen, Duration::from_millis(10));
    assert_eq!(engine.state(), NarrativeState::RatReveal);

    advance_in_ticks(&mut engine, &mut screen, Duration::from_millis(4_490));
    assert_eq!(engine.state(), NarrativeState::RatReveal);
    advance_in_ticks(&mut engine, &mut screen, Duration::from_millis(10));
    assert_eq!(engine.state(), NarrativeState::Conclusion);
    assert_eq!(texts(&screen), vec![KillChoice::Polonius.info().ending_text]);
}

#[test]
fn debug_title_names_the_state() {
    let (engine, _screen) = started();
    assert_eq!(engine.debug_title().as_deref(), Some("Hamlet Brew | Logo"));
}
