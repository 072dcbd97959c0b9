//! Random reframing prompts.

use chrono::Utc;
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

use crate::events::Event;

pub const REFRAME_PROMPTS: [&str; 12] = [
    "Name 3 things that went well today",
    "What would you tell a friend in this situation?",
    "Will this matter in 5 years?",
    "What is one thing you can control right now?",
    "Take a glass of water",
    "Step outside for 2 minutes",
    "Text someone you appreciate",
    "Stretch your shoulders and neck",
    "What are you grateful for right now?",
    "Close your eyes and count to 10",
    "Name 3 things you are good at",
    "What is the kindest thing you can do for yourself?",
];

/// Uniformly pick one item. `None` only for an empty list.
pub fn pick_random<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    items.choose(rng)
}

/// Prompt deck with an injected, seedable randomness source.
#[derive(Debug, Clone)]
pub struct ReframePrompts {
    rng: Mcg128Xsl64,
    current: &'static str,
}

impl ReframePrompts {
    /// Draws the first prompt immediately. `seed` makes the sequence
    /// reproducible; `None` seeds from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => Mcg128Xsl64::seed_from_u64(s),
            None => Mcg128Xsl64::from_entropy(),
        };
        let mut prompts = Self {
            rng,
            current: REFRAME_PROMPTS[0],
        };
        prompts.shuffle();
        prompts
    }

    pub fn current(&self) -> &'static str {
        self.current
    }

    /// Draw a new prompt. Repeats are allowed.
    pub fn shuffle(&mut self) -> Event {
        if let Some(prompt) = pick_random(&REFRAME_PROMPTS, &mut self.rng) {
            self.current = prompt;
        }
        Event::PromptDrawn {
            prompt: self.current.to_string(),
            at: Utc::now(),
        }
    }
}
