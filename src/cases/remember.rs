//! Remember Case
//!
//! Saves incoming data for later recall, with normalization hooks applied
//! before the save and insight callbacks fired after it.

use std::fmt;

use serde_json::Value;

use crate::memory::{clock, Image, ImageKey, MemoryStore, TimedImage};
use crate::query::class_key_for;

// == Hook Types ==
/// Pure transform applied to the incoming batch before saving.
pub type Normalizer = Box<dyn Fn(Vec<Image>) -> Vec<Image>>;

/// Callback observing the freshly saved class contents.
enum Insight {
    Plain(Box<dyn Fn(Option<Vec<Option<Image>>>)>),
    WithRelevance(Box<dyn Fn(Option<Vec<TimedImage>>)>),
}

// == Remember ==
/// Stateful façade around batch saves.
///
/// Owns the normalization pipeline and the insight callbacks; the store is
/// borrowed per call.
#[derive(Default)]
pub struct Remember {
    normalizers: Vec<Normalizer>,
    insights: Vec<Insight>,
}

impl Remember {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Add Normalizer ==
    /// Registers a batch transform; normalizers run in registration order.
    pub fn add_normalizer(&mut self, normalizer: impl Fn(Vec<Image>) -> Vec<Image> + 'static) {
        self.normalizers.push(Box::new(normalizer));
    }

    // == Add Insight ==
    /// Registers a callback fired after each save with the class's fresh
    /// contents.
    pub fn add_insight(&mut self, insight: impl Fn(Option<Vec<Option<Image>>>) + 'static) {
        self.insights.push(Insight::Plain(Box::new(insight)));
    }

    /// Like `add_insight`, with relevance timestamps included.
    pub fn add_insight_with_relevance(
        &mut self,
        insight: impl Fn(Option<Vec<TimedImage>>) + 'static,
    ) {
        self.insights.push(Insight::WithRelevance(Box::new(insight)));
    }

    // == Remember ==
    /// Saves data under the query's class and returns the derived keys.
    ///
    /// An array is treated as a batch; any other image is a batch of one.
    /// The whole batch shares one save timestamp. Insights observe the
    /// class contents as saved — read-after-write within the same call.
    pub fn remember(
        &self,
        store: &mut MemoryStore,
        data: Image,
        query: Option<&Image>,
    ) -> Vec<Option<ImageKey>> {
        let batch = match data {
            Value::Array(items) => items,
            single => vec![single],
        };
        let class = class_key_for(query);

        let batch = self.normalize(batch);
        let keys = store.save_batch(batch, class.as_deref(), Some(clock::now_ms()));
        self.apply_insights(store, class.as_deref());

        keys
    }

    fn normalize(&self, batch: Vec<Image>) -> Vec<Image> {
        self.normalizers
            .iter()
            .fold(batch, |batch, normalizer| normalizer(batch))
    }

    fn apply_insights(&self, store: &MemoryStore, class: Option<&str>) {
        for insight in &self.insights {
            match insight {
                Insight::Plain(observe) => observe(store.pull_by_class(class)),
                Insight::WithRelevance(observe) => {
                    observe(store.pull_by_class_with_relevance(class))
                }
            }
        }
    }
}

impl fmt::Debug for Remember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Remember")
            .field("normalizers", &self.normalizers.len())
            .field("insights", &self.insights.len())
            .finish()
    }
}
