use crate::gesture::GestureState;

/// Text and CSS color of the on-screen status badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusBadge {
    pub text: &'static str,
    pub color: &'static str,
}

pub const GUIDE_TEXT: &str =
    "🖐 Open: Explode  |  👌 Pinch: Photo  |  ✊ Fist: Flag  |  👐 2 Hands: Heart";

impl GestureState {
    pub fn badge(self) -> StatusBadge {
        match self {
            GestureState::Flag | GestureState::None => StatusBadge {
                text: "🇻🇳 VIET NAM 🇻🇳",
                color: "#FFD700",
            },
            GestureState::Heart => StatusBadge {
                text: "❤️ WE LOVE VIET NAM ❤️",
                color: "#FF69B4",
            },
            GestureState::Photo => StatusBadge {
                text: "👌 VIEW PHOTO",
                color: "#00FFFF",
            },
            GestureState::Explode => StatusBadge {
                text: "🖐️ EXPLODE",
                color: "#FFA500",
            },
        }
    }
}
