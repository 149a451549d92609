// ============================================================
// Reference Corpus
// ============================================================
// Holds the known stories and answers two questions:
//
//   find_similar_story(text)   → does this text look like a story
//                                 we have gold answers for?
//   reference_answers(id)      → that story's gold Q&A pairs
//
// Matching compares the lowercased first 500 characters of the
// input with the same sample of every story (story text, or the
// whole record when it has no text) and keeps the best ratio if
// it is above 0.4. Cost is O(stories × 500²) per call, which is
// fine for a few hundred stories.
//
// The story list is filled once in the constructor and never
// mutated, so a corpus can be shared freely between readers.
// To pick up new data, build a new corpus.

use anyhow::Result;

use crate::domain::story::{ReferenceAnswer, Story};
use crate::domain::traits::StorySource;
use crate::data::sentences::truncate_chars;
use crate::quiz::similarity::char_ratio;

/// Characters of each text compared when matching stories
pub const MATCH_SAMPLE_CHARS: usize = 500;

/// A story matches only when its ratio is strictly above this
pub const STORY_MATCH_THRESHOLD: f64 = 0.4;

#[derive(Debug, Default)]
pub struct ReferenceCorpus {
    stories: Vec<Story>,
}

impl ReferenceCorpus {
    /// Build from already-loaded stories. A later story with the same
    /// id replaces the earlier one but keeps its position.
    pub fn new(stories: Vec<Story>) -> Self {
        let mut unique: Vec<Story> = Vec::with_capacity(stories.len());
        for story in stories {
            match unique.iter_mut().find(|s| s.id == story.id) {
                Some(existing) => {
                    tracing::debug!("Story '{}' defined twice, keeping the later one", story.id);
                    *existing = story;
                }
                None => unique.push(story),
            }
        }

        let pairs: usize = unique.iter().map(|s| s.questions.len()).sum();
        tracing::info!(
            "Reference corpus ready: {} stories, {} QA pairs",
            unique.len(),
            pairs
        );
        Self { stories: unique }
    }

    /// Load through any StorySource. Sources fail soft, so this only
    /// errors if the source itself reports a hard failure.
    pub fn load(source: &dyn StorySource) -> Result<Self> {
        Ok(Self::new(source.load_stories()?))
    }

    pub fn is_available(&self) -> bool {
        !self.stories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn story(&self, id: &str) -> Option<&Story> {
        self.stories.iter().find(|s| s.id == id)
    }

    /// Id of the story most similar to `input_text`, if any is similar enough.
    pub fn find_similar_story(&self, input_text: &str) -> Option<&str> {
        let input_lower  = input_text.to_lowercase();
        let input_sample = truncate_chars(&input_lower, MATCH_SAMPLE_CHARS);

        let mut best: Option<(&Story, f64)> = None;
        for story in &self.stories {
            let story_lower  = story.match_text().to_lowercase();
            let story_sample = truncate_chars(&story_lower, MATCH_SAMPLE_CHARS);
            let ratio        = char_ratio(input_sample, story_sample);

            if best.map_or(true, |(_, r)| ratio > r) {
                best = Some((story, ratio));
            }
        }

        let (story, ratio) = best?;
        tracing::debug!("Closest story '{}' with ratio {:.3}", story.id, ratio);
        (ratio > STORY_MATCH_THRESHOLD).then_some(story.id.as_str())
    }

    /// Gold answers for a story, derived fresh on every call.
    /// Unknown ids give an empty list.
    pub fn reference_answers(&self, story_id: &str) -> Vec<ReferenceAnswer> {
        self.story(story_id)
            .map(Story::reference_answers)
            .unwrap_or_default()
    }
}
