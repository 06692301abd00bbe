fn draw_logo(screen: &mut Screen) {
    screen.draw_image("logo", 1.0, 50.0);
}

fn draw_instructions(screen: &mut Screen) {
    screen.draw_bold_label("Instructions:", 10.0, 30.0);
    screen.draw_label("Press 1,2,3 to", 10.0, 50.0);
    screen.draw_label("change landscape", 10.0, 65.0);
    screen.draw_label("Press 4,5,6 to", 10.0, 85.0);
    screen.draw_label("change the wall", 10.0, 100.0);
}

fn stage_images(context: &SceneContext) -> Vec<(String, f32, f32)> {
    vec![
        (context.outdoor_key(), 85.0, 25.0),
        (context.wall_key(), 0.0, 0.0),
        ("hamlet".to_string(), 21.0, 42.0),
        ("gertrude".to_string(), 53.0, 27.0),
    ]
}

fn draw_stage(screen: &mut Screen, context: &SceneContext) {
    screen.set_stage(stage_images(context));
}

fn draw_stage_with_prop(screen: &mut Screen, context: &SceneContext, key: String, x: f32, y: f32) {
    let mut images = stage_images(context);
    images.push((key, x, y));
    screen.set_stage(images);
}

fn draw_text_box(screen: &mut Screen, text: &str) {
    screen.draw_text(text, TEXT_BOX_X, TEXT_BOX_Y);
}

fn draw_tale_about_the_rat(screen: &mut Screen, context: &SceneContext) {
    draw_stage(screen, context);
    draw_text_box(screen, TALE_TEXT);
}

fn draw_choices(screen: &mut Screen, context: &SceneContext) {
    draw_stage(screen, context);
    if let Some(menu) = screen.draw_menu(CHOICES_TITLE, KillChoice::menu_items(), MENU_Y) {
        menu.activate();
    }
}

fn draw_sword_frame(screen: &mut Screen, context: &SceneContext, frame: u8) {
    draw_stage_with_prop(screen, context, format!("sword{frame}"), 5.0, 52.0);
}

fn draw_reveal_frame(screen: &mut Screen, context: &SceneContext, choice: KillChoice, frame: u8) {
    draw_stage_with_prop(screen, context, choice.reveal_frame_key(frame), 0.0, 37.0);
}

fn draw_conclusion(screen: &mut Screen, context: &SceneContext, choice: KillChoice) {
    let info = choice.info();
    draw_text_box(screen, info.ending_text);
    match info.ending_art {
        EndingArt::Stage { key, x, y } => {
            draw_stage_with_prop(screen, context, key.to_string(), x, y)
        }
        EndingArt::FullScreen { key } => screen.draw_image(key, 0.0, 0.0),
    }
}
