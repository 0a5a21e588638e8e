use crate::domain::{Field, FieldErrors, SubscriberEmail, SubscriberName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscriber {
    pub email: SubscriberEmail,
    pub name: SubscriberName,
}

impl NewSubscriber {
    /// Runs every field rule and collects all failures, it never stops at the
    /// first invalid field.
    pub fn parse(name: String, email: String) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = SubscriberName::parse(name).map_err(|e| errors.push(Field::Name, e));
        let email = SubscriberEmail::parse(email).map_err(|e| errors.push(Field::Email, e));
        match (name, email) {
            (Ok(name), Ok(email)) => Ok(Self { name, email }),
            _ => Err(errors),
        }
    }
}
