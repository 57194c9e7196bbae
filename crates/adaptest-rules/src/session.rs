//! Session loop configuration: a rule-set plus the callbacks that connect it
//! to a testee.

use crate::capability::{Part, TrackedResponses};
use crate::rules::CatRules;
use std::fmt;
use std::sync::Arc;

/// Obtains the testee's response to an item: `(item_index, item_label)` to a
/// response code. May block on I/O (prompting a person, reading simulated
/// data); it runs under the session loop's control, never here.
pub type GetResponse = Arc<dyn Fn(usize, &str) -> i8 + Send + Sync>;

/// Called after every response with the history so far and whether the
/// session is about to terminate.
pub type NewResponseCallback = Arc<dyn Fn(&TrackedResponses, bool) + Send + Sync>;

/// Immutable configuration of one session loop.
///
/// The rule-set is shared: many configs, one per simulated testee say, may
/// point at the same [`CatRules`].
#[derive(Clone)]
pub struct CatLoopConfig {
    rules: Arc<CatRules>,
    get_response: GetResponse,
    new_response_callback: Option<NewResponseCallback>,
}

impl CatLoopConfig {
    pub fn new(
        rules: Arc<CatRules>,
        get_response: impl Fn(usize, &str) -> i8 + Send + Sync + 'static,
    ) -> Self {
        Self {
            rules,
            get_response: Arc::new(get_response),
            new_response_callback: None,
        }
    }

    /// The same config with `callback` invoked after each response.
    pub fn with_new_response_callback(
        self,
        callback: impl Fn(&TrackedResponses, bool) + Send + Sync + 'static,
    ) -> Self {
        Self {
            new_response_callback: Some(Arc::new(callback)),
            ..self
        }
    }

    pub fn rules(&self) -> &Arc<CatRules> {
        &self.rules
    }

    pub fn get_response_fn(&self) -> &GetResponse {
        &self.get_response
    }

    pub fn new_response_callback(&self) -> Option<&NewResponseCallback> {
        self.new_response_callback.as_ref()
    }

    /// Ask for the response to `item_index`.
    pub fn get_response(&self, item_index: usize, item_label: &str) -> i8 {
        (self.get_response)(item_index, item_label)
    }

    /// Fire the per-response callback, if one is configured.
    pub fn notify_new_response(&self, responses: &TrackedResponses, is_final: bool) {
        if let Some(callback) = &self.new_response_callback {
            callback(responses, is_final);
        }
    }

    /// The wrapped rule-set, as a single composite part.
    pub fn parts(&self) -> Vec<Part<'_>> {
        vec![Part::Composite(self.rules.parts())]
    }
}

impl fmt::Debug for CatLoopConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatLoopConfig")
            .field("rules", &self.rules)
            .field("get_response", &"<fn>")
            .field(
                "new_response_callback",
                &self.new_response_callback.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}
