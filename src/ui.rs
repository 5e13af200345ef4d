//! Overlay/HUD view model
//!
//! The DOM shell renders exactly what this module derives from simulation
//! state. Keeping the mapping pure makes the overlay testable without a
//! browser.

use crate::sim::{QuizMode, SimState};

/// Rejected-answer message shown under the quiz input
pub const WRONG_ANSWER_TEXT: &str = "Yanlış cevap. Tekrar dene.";

/// Everything the overlay needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayModel {
    pub visible: bool,
    pub title: String,
    pub description: String,
    pub start_label: String,
    pub share_visible: bool,
    pub quiz_visible: bool,
    pub quiz_prompt: String,
    pub quiz_error: String,
}

impl OverlayModel {
    pub fn derive(state: &SimState) -> Self {
        let quiz_prompt = state.quiz.prompt();
        let quiz_error = if state.quiz_error {
            WRONG_ANSWER_TEXT.to_string()
        } else {
            String::new()
        };

        match state.quiz_mode {
            QuizMode::Continue => Self {
                visible: true,
                title: "Devam etmek için çöz".to_string(),
                description: format!(
                    "{} hamlede bir küçük soru.",
                    state.tuning.checkpoint_interval
                ),
                start_label: "Devam Et".to_string(),
                share_visible: false,
                quiz_visible: true,
                quiz_prompt,
                quiz_error,
            },
            QuizMode::Restart => Self {
                visible: true,
                title: "Kaybettiniz".to_string(),
                description: format!("Skorun: {}", state.display_score()),
                start_label: "Yeniden Başla".to_string(),
                share_visible: true,
                quiz_visible: true,
                quiz_prompt,
                quiz_error,
            },
            QuizMode::None => Self {
                visible: !state.running,
                title: "Koşucu".to_string(),
                description: "Basılı tut: küp uzar. Bırak: yana devrilir.".to_string(),
                start_label: "Başlat".to_string(),
                share_visible: false,
                quiz_visible: false,
                quiz_prompt,
                quiz_error,
            },
        }
    }
}

/// Text placed on the clipboard by the share button
pub fn share_text(score: u32) -> String {
    format!("Skorum {}! Daha iyisini yapabilir misin?", score)
}
