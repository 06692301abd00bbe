use std::time::Duration;

use brew::{Applet, LogicalKey, MenuEvent, Scheduler, Screen};
use tracing::{debug, info, warn};

const LOGO_DURATION: Duration = Duration::from_secs(2);
const INSTRUCTIONS_DURATION: Duration = Duration::from_secs(3);
const TALE_ABOUT_RAT_DURATION: Duration = Duration::from_secs(10);
const STAB_HOLD_DURATION: Duration = Duration::from_secs(2);
const RAT_REVEAL_HOLD_DURATION: Duration = Duration::from_secs(4);
const SWORD_FRAME_INTERVAL: Duration = Duration::from_millis(500);
const REVEAL_FRAME_GAPS: [Duration; 2] = [Duration::from_millis(200), Duration::from_millis(300)];
const ANIMATION_FRAMES: u8 = 3;

const TEXT_BOX_X: f32 = 3.0;
const TEXT_BOX_Y: f32 = 85.0;
const MENU_Y: f32 = 85.0;

const CHOICES_TITLE: &str = "Who does Hamlet Kill?";
const TALE_TEXT: &str = "Queen Gertrude:  Hamlet, o, Hamlet.  Wherefore art thou staring at my curtain?\nHamlet:  For I've found a rat.  Die, rat, die!";
const STABBING_TEXT: &str = "Hamlet stabs the rat";

include!("types.rs");
include!("scenes.rs");
include!("engine.rs");
