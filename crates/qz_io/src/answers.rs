//! Answer sheet file.
//!
//! Either a flat array of answers (one page) or an array of pages:
//! ```json
//! [[{ "category": 1, "weight": 4 }, { "category": 3, "weight": 2 }],
//!  [{ "category": 5, "weight": 1 }]]
//! ```
//! Each page is committed to the engine as one atomic batch.

use std::path::Path;

use serde::Deserialize;

use qz_core::{Answer, EngineConfig};

use crate::settings::Settings;
use crate::{read_to_string, IoError, IoResult};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAnswer {
    category: u32,
    weight: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSheet {
    Pages(Vec<Vec<RawAnswer>>),
    Flat(Vec<RawAnswer>),
}

/// Validated answers grouped by page, in submission order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AnswerSheet {
    pub pages: Vec<Vec<Answer>>,
}

impl AnswerSheet {
    pub fn answer_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }
}

fn check_answer(
    raw: &RawAnswer,
    cfg: &EngineConfig,
    max_weight: Option<u32>,
    pointer: impl Fn() -> String,
) -> IoResult<Answer> {
    let category = cfg.category(raw.category).map_err(|e| IoError::Json {
        pointer: format!("{}/category", pointer()),
        msg: e.to_string(),
    })?;
    if let Some(max) = max_weight {
        if raw.weight > max {
            return Err(IoError::Json {
                pointer: format!("{}/weight", pointer()),
                msg: format!("weight {} exceeds max_weight {max}", raw.weight),
            });
        }
    }
    Ok(Answer::new(category, raw.weight))
}

/// Parse and validate a sheet against the engine's category domain and the weight cap.
pub fn parse_answers(text: &str, settings: &Settings) -> IoResult<AnswerSheet> {
    let cfg = &settings.engine;
    let max = settings.max_weight;

    let pages = match serde_json::from_str::<RawSheet>(text)? {
        RawSheet::Flat(answers) => {
            let page = answers
                .iter()
                .enumerate()
                .map(|(i, a)| check_answer(a, cfg, max, || format!("/{i}")))
                .collect::<IoResult<Vec<_>>>()?;
            vec![page]
        }
        RawSheet::Pages(pages) => pages
            .iter()
            .enumerate()
            .map(|(p, page)| {
                page.iter()
                    .enumerate()
                    .map(|(i, a)| check_answer(a, cfg, max, || format!("/{p}/{i}")))
                    .collect::<IoResult<Vec<_>>>()
            })
            .collect::<IoResult<Vec<_>>>()?,
    };
    Ok(AnswerSheet { pages })
}

pub fn load_answers(path: &Path, settings: &Settings) -> IoResult<AnswerSheet> {
    parse_answers(&read_to_string(path)?, settings)
}
