use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{InstructionStep, Recipe};

const SUMMARY_EXCERPT_CHARS: usize = 200;
const NO_INSTRUCTIONS: &str = "No instructions provided. Please check the source link.";

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// One open recipe and the ingredient ids ticked off while it is open.
#[derive(Debug, Clone)]
pub struct RecipeSession {
    recipe: Recipe,
    checked: BTreeSet<i64>,
}

impl RecipeSession {
    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn is_checked(&self, ingredient_id: i64) -> bool {
        self.checked.contains(&ingredient_id)
    }

    pub fn checked(&self) -> impl Iterator<Item = i64> + '_ {
        self.checked.iter().copied()
    }
}

/// The detail view. At most one recipe is open at a time.
#[derive(Debug, Clone, Default)]
pub struct DetailView {
    session: Option<RecipeSession>,
}

impl DetailView {
    /// Opens `recipe`, discarding any previous session and its checked state.
    pub fn open(&mut self, recipe: Recipe) -> &RecipeSession {
        self.session.insert(RecipeSession {
            recipe,
            checked: BTreeSet::new(),
        })
    }

    /// Flips the checked state of an ingredient. Returns the new state, or `None`
    /// when nothing is open.
    pub fn toggle_checked(&mut self, ingredient_id: i64) -> Option<bool> {
        let session = self.session.as_mut()?;
        if session.checked.remove(&ingredient_id) {
            Some(false)
        } else {
            session.checked.insert(ingredient_id);
            Some(true)
        }
    }

    pub fn close(&mut self) -> Option<Recipe> {
        self.session.take().map(|s| s.recipe)
    }

    pub fn current(&self) -> Option<&RecipeSession> {
        self.session.as_ref()
    }
}

impl Recipe {
    /// Steps of the first analyzed instruction set, or a single placeholder step.
    pub fn instruction_steps(&self) -> Vec<InstructionStep> {
        match self.detail.analyzed_instructions.first() {
            Some(instruction) if !instruction.steps.is_empty() => instruction.steps.clone(),
            _ => vec![InstructionStep {
                number: 1,
                step: NO_INSTRUCTIONS.to_string(),
            }],
        }
    }

    /// Plain-text start of the HTML summary.
    pub fn summary_excerpt(&self) -> String {
        let text = HTML_TAG.replace_all(&self.detail.summary, "");
        let text = text.trim();
        if text.chars().count() > SUMMARY_EXCERPT_CHARS {
            format!(
                "{}...",
                text.chars().take(SUMMARY_EXCERPT_CHARS).collect::<String>()
            )
        } else {
            text.to_string()
        }
    }

    pub fn share_text(&self) -> String {
        format!(
            "Check out this recipe for {}! {}",
            self.detail.title, self.detail.source_url
        )
    }

    pub fn missing_ingredient_names(&self) -> Vec<&str> {
        self.matched
            .missed_ingredients
            .iter()
            .map(|i| i.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{detail, recipe, summary};
    use crate::model::AnalyzedInstruction;

    #[test]
    fn toggle_is_symmetric() {
        let mut view = DetailView::default();
        assert_eq!(view.toggle_checked(1), None);

        view.open(recipe(1, 10, 0));
        assert_eq!(view.toggle_checked(42), Some(true));
        assert!(view.current().unwrap().is_checked(42));
        assert_eq!(view.toggle_checked(42), Some(false));
        assert!(!view.current().unwrap().is_checked(42));
    }

    #[test]
    fn reopening_resets_checked_state() {
        let mut view = DetailView::default();
        view.open(recipe(1, 10, 0));
        view.toggle_checked(7);

        view.open(recipe(2, 10, 0));
        assert_eq!(view.current().unwrap().recipe().id(), 2);
        assert_eq!(view.current().unwrap().checked().count(), 0);

        let closed = view.close().unwrap();
        assert_eq!(closed.id(), 2);
        assert!(view.current().is_none());

        view.open(closed);
        assert_eq!(view.current().unwrap().checked().count(), 0);
    }

    #[test]
    fn instructions_fall_back_to_placeholder() {
        let mut d = detail(1, 10, 0);
        assert_eq!(Recipe::merge(d.clone(), None).instruction_steps()[0].step, NO_INSTRUCTIONS);

        d.analyzed_instructions = vec![AnalyzedInstruction {
            name: String::new(),
            steps: vec![
                InstructionStep { number: 1, step: "Chop".to_string() },
                InstructionStep { number: 2, step: "Fry".to_string() },
            ],
        }];
        let steps = Recipe::merge(d, None).instruction_steps();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].step, "Fry");
    }

    #[test]
    fn summary_excerpt_strips_tags_and_truncates() {
        let mut d = detail(1, 10, 0);
        d.summary = "A <b>quick</b> dinner.".to_string();
        assert_eq!(Recipe::merge(d.clone(), None).summary_excerpt(), "A quick dinner.");

        d.summary = format!("<p>{}</p>", "x".repeat(250));
        let excerpt = Recipe::merge(d, None).summary_excerpt();
        assert_eq!(excerpt.chars().count(), SUMMARY_EXCERPT_CHARS + 3);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn share_text_and_missing_names() {
        let r = Recipe::merge(detail(3, 10, 0), Some(&summary(3, 1, 2)));
        assert_eq!(
            r.share_text(),
            "Check out this recipe for Recipe 3! https://example.com/recipes/3"
        );
        assert_eq!(r.missing_ingredient_names(), vec!["missed", "missed"]);
    }
}
