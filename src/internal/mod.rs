/// Module that provides the growable container behind the token store and the rule table.
mod growable;
pub(crate) use growable::Growable;
