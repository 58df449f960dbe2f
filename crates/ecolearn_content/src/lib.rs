//! EcoLearn content - game catalogs and session presets
//!
//! Everything game-specific lives here: the environmental question bank,
//! escape-room puzzles, pollution cases, the waste pile, and the word
//! list, each paired with a [`SessionConfig`](ecolearn_engine::SessionConfig)
//! preset describing how that game plays. The engine stays generic; a game
//! is a catalog plus a preset.
//!
//! | Game | Catalog | Preset |
//! |------|---------|--------|
//! | Quiz battle | [`quiz::question_bank`] | [`quiz::quiz_battle`] |
//! | Escape room | [`escape::escape_catalog`] | [`escape::escape_room`] |
//! | Pollution detective | [`detective::case_files`] | [`detective::pollution_detective`] |
//! | Recycle sorting | [`sorting::waste_pile`] | [`sorting::recycle_sorting`] |
//! | Word search | [`words::word_list`] | [`words::word_search`] |
//!
//! External quiz banks load through [`toml_bank::load_quiz_bank`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod detective;
pub mod escape;
pub mod quiz;
pub mod sorting;
pub mod toml_bank;
pub mod words;
