#[derive(Debug, Default)]
pub(crate) struct NarrativeEngine {
    state: NarrativeState,
    kill_choice: KillChoice,
    context: SceneContext,
    timers: Scheduler<StoryTimer>,
}

impl NarrativeEngine {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn state(&self) -> NarrativeState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn kill_choice(&self) -> KillChoice {
        self.kill_choice
    }

    #[cfg(test)]
    pub(crate) fn scene_context(&self) -> SceneContext {
        self.context
    }

    pub(crate) fn start(&mut self, screen: &mut Screen) {
        info!("story_started");
        self.show_state(NarrativeState::Logo, screen);
    }

    pub(crate) fn handle_key(&mut self, key: LogicalKey, screen: &mut Screen) {
        if key == LogicalKey::Unknown {
            return;
        }
        self.route_key_to_menu(key, screen);

        if self.context.apply_key(key) {
            debug!(
                key = ?key,
                outdoor_backdrop = self.context.outdoor_backdrop(),
                wall_backdrop = self.context.wall_backdrop(),
                "backdrop_changed"
            );
            if self.state.shows_set_pieces_live() {
                draw_stage(screen, &self.context);
            }
        }
    }

    pub(crate) fn handle_menu_event(&mut self, event: MenuEvent, screen: &mut Screen) {
        let MenuEvent::ItemSelected(item) = event;
        if let Some(menu) = screen.menu_mut() {
            menu.deactivate();
        }
        match KillChoice::from_name(&item) {
            Some(choice) => self.make_kill_choice(choice, screen),
            None => {
                warn!(item = %item, "menu_item_unrecognized");
                self.show_state(NarrativeState::Stabbing, screen);
            }
        }
    }

    pub(crate) fn make_kill_choice(&mut self, choice: KillChoice, screen: &mut Screen) {
        self.kill_choice = choice;
        info!(choice = ?choice, "kill_choice_made");
        self.show_state(NarrativeState::Stabbing, screen);
    }

    pub(crate) fn force_to_choices(&mut self, screen: &mut Screen) {
        info!(from = ?self.state, "force_to_choices");
        self.show_state(NarrativeState::Choices, screen);
    }

    pub(crate) fn advance(&mut self, dt: Duration, screen: &mut Screen) {
        let deadline = self.timers.deadline_after(dt);
        while let Some(timer) = self.timers.pop_due(deadline) {
            self.fire(timer, screen);
        }
        self.timers.settle(deadline);
    }

    #[cfg(test)]
    fn pending_timers(&self) -> usize {
        self.timers.pending_len()
    }

    fn route_key_to_menu(&mut self, key: LogicalKey, screen: &mut Screen) {
        let Some(menu) = screen.menu_mut() else {
            return;
        };
        if !menu.is_active() {
            return;
        }
        let event = match key {
            LogicalKey::ArrowUp => {
                menu.move_previous();
                None
            }
            LogicalKey::ArrowDown => {
                menu.move_next();
                None
            }
            LogicalKey::Ok => Some(menu.commit()),
            _ => None,
        };
        if let Some(event) = event {
            self.handle_menu_event(event, screen);
        }
    }

    fn fire(&mut self, timer: StoryTimer, screen: &mut Screen) {
        match timer {
            StoryTimer::Transition(state) => self.show_state(state, screen),
            StoryTimer::SwordFrame(frame) => self.show_sword_frame(frame, screen),
            StoryTimer::RevealFrame(frame) => self.show_reveal_frame(frame, screen),
        }
    }

    fn show_state(&mut self, state: NarrativeState, screen: &mut Screen) {
        let generation = self.timers.start_generation();
        self.state = state;
        screen.clear();
        info!(state = ?state, generation, "state_entered");

        match state {
            NarrativeState::Logo => draw_logo(screen),
            NarrativeState::Instructions => draw_instructions(screen),
            NarrativeState::TaleAboutTheRat => draw_tale_about_the_rat(screen, &self.context),
            NarrativeState::Choices => draw_choices(screen, &self.context),
            NarrativeState::Stabbing => {
                draw_text_box(screen, STABBING_TEXT);
                self.show_sword_frame(1, screen);
            }
            NarrativeState::RatReveal => {
                draw_text_box(screen, self.kill_choice.info().reveal_text);
                self.show_reveal_frame(1, screen);
            }
            NarrativeState::Conclusion => draw_conclusion(screen, &self.context, self.kill_choice),
        }

        if let Some((next, hold)) = state.timed_successor() {
            self.timers.schedule(hold, StoryTimer::Transition(next));
        }
    }

    fn show_sword_frame(&mut self, frame: u8, screen: &mut Screen) {
        draw_sword_frame(screen, &self.context, frame);
        if frame < ANIMATION_FRAMES {
            self.timers
                .schedule(SWORD_FRAME_INTERVAL, StoryTimer::SwordFrame(frame + 1));
        } else {
            self.timers.schedule(
                STAB_HOLD_DURATION,
                StoryTimer::Transition(NarrativeState::RatReveal),
            );
        }
    }

    fn show_reveal_frame(&mut self, frame: u8, screen: &mut Screen) {
        draw_reveal_frame(screen, &self.context, self.kill_choice, frame);
        match REVEAL_FRAME_GAPS.get(usize::from(frame) - 1) {
            Some(gap) => self.timers.schedule(*gap, StoryTimer::RevealFrame(frame + 1)),
            None => self.timers.schedule(
                RAT_REVEAL_HOLD_DURATION,
                StoryTimer::Transition(NarrativeState::Conclusion),
            ),
        }
    }
}

impl Applet for NarrativeEngine {
    fn start(&mut self, screen: &mut Screen) {
        NarrativeEngine::start(self, screen);
    }

    fn key_pressed(&mut self, key: LogicalKey, screen: &mut Screen) {
        self.handle_key(key, screen);
    }

    fn update(&mut self, dt: Duration, screen: &mut Screen) {
        self.advance(dt, screen);
    }

    fn debug_title(&self) -> Option<String> {
        Some(format!("Hamlet Brew | {:?}", self.state()))
    }
}
