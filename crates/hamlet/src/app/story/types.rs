#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) enum NarrativeState {
    #[default]
    Logo,
    Instructions,
    TaleAboutTheRat,
    Choices,
    Stabbing,
    RatReveal,
    Conclusion,
}

impl NarrativeState {
    fn timed_successor(self) -> Option<(NarrativeState, Duration)> {
        match self {
            NarrativeState::Logo => Some((NarrativeState::Instructions, LOGO_DURATION)),
            NarrativeState::Instructions => {
                Some((NarrativeState::TaleAboutTheRat, INSTRUCTIONS_DURATION))
            }
            NarrativeState::TaleAboutTheRat => {
                Some((NarrativeState::Choices, TALE_ABOUT_RAT_DURATION))
            }
            NarrativeState::Choices
            | NarrativeState::Stabbing
            | NarrativeState::RatReveal
            | NarrativeState::Conclusion => None,
        }
    }

    fn shows_set_pieces_live(self) -> bool {
        matches!(
            self,
            NarrativeState::TaleAboutTheRat | NarrativeState::Choices
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) enum KillChoice {
    #[default]
    Polonius,
    Kenny,
    Splinter,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum EndingArt {
    Stage { key: &'static str, x: f32, y: f32 },
    FullScreen { key: &'static str },
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct KillChoiceInfo {
    pub(crate) name: &'static str,
    pub(crate) stem: &'static str,
    pub(crate) reveal_text: &'static str,
    pub(crate) ending_text: &'static str,
    pub(crate) ending_art: EndingArt,
}

const KILL_CHOICES: [(KillChoice, KillChoiceInfo); 3] = [
    (
        KillChoice::Polonius,
        KillChoiceInfo {
            name: "Polonius",
            stem: "polonius",
            reveal_text: "Polonius: Oy, I am slain, bleh.\n*Polonius falls*",
            ending_text: "Queen Gertrude: *cries* Unbelievable!  Thou has wrecked my favorite curtain!  Consider thyself disowned!  ~THE END~",
            ending_art: EndingArt::Stage {
                key: "teardrops",
                x: 69.0,
                y: 38.0,
            },
        },
    ),
    (
        KillChoice::Kenny,
        KillChoiceInfo {
            name: "Kenny",
            stem: "kenny",
            reveal_text: "Kenny: Mmmmmmmm.\n*Kenny dies*",
            ending_text: "Stan: Oh my god! They killed Kenny!\nKyle: You bastards!\n~THE END~",
            ending_art: EndingArt::FullScreen { key: "stankyle" },
        },
    ),
    (
        KillChoice::Splinter,
        KillChoiceInfo {
            name: "Splinter",
            stem: "splinter",
            reveal_text: "Splinter: Why? Why me?\n*Splinter falls*",
            ending_text: "Splinter:  Turtles, you must avenge my death!\nDa Vinci:  Aww.. Do we have to?\n~THE END~",
            ending_art: EndingArt::FullScreen { key: "turtles" },
        },
    ),
];

impl KillChoice {
    pub(crate) const ALL: [KillChoice; 3] =
        [KillChoice::Polonius, KillChoice::Kenny, KillChoice::Splinter];

    pub(crate) fn info(self) -> &'static KillChoiceInfo {
        // The table lists every variant in declaration order.
        &KILL_CHOICES[self as usize].1
    }

    pub(crate) fn name(self) -> &'static str {
        self.info().name
    }

    pub(crate) fn from_name(name: &str) -> Option<KillChoice> {
        KILL_CHOICES
            .iter()
            .find(|(_, info)| info.name == name)
            .map(|(choice, _)| *choice)
    }

    pub(crate) fn menu_items() -> Vec<String> {
        Self::ALL.iter().map(|choice| choice.name().to_string()).collect()
    }

    pub(crate) fn reveal_frame_key(self, frame: u8) -> String {
        format!("{}{frame}", self.info().stem)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SceneContext {
    outdoor_backdrop: u8,
    wall_backdrop: u8,
}

impl SceneContext {
    pub(crate) fn outdoor_backdrop(&self) -> u8 {
        self.outdoor_backdrop
    }

    pub(crate) fn wall_backdrop(&self) -> u8 {
        self.wall_backdrop
    }

    pub(crate) fn outdoor_key(&self) -> String {
        format!("back{}", self.outdoor_backdrop)
    }

    pub(crate) fn wall_key(&self) -> String {
        format!("wall{}", self.wall_backdrop)
    }

    pub(crate) fn apply_key(&mut self, key: LogicalKey) -> bool {
        match key {
            LogicalKey::Num1 => self.outdoor_backdrop = 1,
            LogicalKey::Num2 => self.outdoor_backdrop = 2,
            LogicalKey::Num3 => self.outdoor_backdrop = 3,
            LogicalKey::Num4 => self.wall_backdrop = 1,
            LogicalKey::Num5 => self.wall_backdrop = 2,
            LogicalKey::Num6 => self.wall_backdrop = 3,
            LogicalKey::Unknown
            | LogicalKey::ArrowUp
            | LogicalKey::ArrowDown
            | LogicalKey::Ok => return false,
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StoryTimer {
    Transition(NarrativeState),
    SwordFrame(u8),
    RevealFrame(u8),
}
