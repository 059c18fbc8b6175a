use crate::{Attempt, Cursor, Result, RuleSet, ScanContext};

type PendingRegistration<K> = Box<dyn FnOnce(&mut ScanContext<K>) -> Result<()>>;

/// A builder for creating a scan context.
///
/// Rules and rule sets are registered in the order they are added to the builder.
pub struct ScanContextBuilder<K> {
    registrations: Vec<PendingRegistration<K>>,
}

impl<K: 'static> ScanContextBuilder<K> {
    /// Creates a new scan context builder.
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    /// Adds a rule to the scan context builder.
    pub fn add_rule<C, F>(mut self, name: &str, condition: C, consumer: F) -> Self
    where
        C: Fn(char) -> bool + 'static,
        F: Fn(&mut Cursor<'_>, char) -> Attempt<K> + 'static,
    {
        let name = name.to_string();
        self.registrations
            .push(Box::new(move |context: &mut ScanContext<K>| {
                context.register(&name, condition, consumer).map(|_| ())
            }));
        self
    }

    /// Adds all rules of a rule set to the scan context builder.
    pub fn add_rule_set<S>(mut self, rule_set: S) -> Self
    where
        S: RuleSet<K> + 'static,
    {
        self.registrations
            .push(Box::new(move |context: &mut ScanContext<K>| {
                context.register_set(&rule_set)
            }));
        self
    }

    /// Builds the scan context from the scan context builder.
    pub fn build(self) -> Result<ScanContext<K>> {
        let mut context = ScanContext::new();
        for registration in self.registrations {
            registration(&mut context)?;
        }
        Ok(context)
    }
}

impl<K: 'static> Default for ScanContextBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> std::fmt::Debug for ScanContextBuilder<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanContextBuilder")
            .field("registrations", &self.registrations.len())
            .finish()
    }
}
