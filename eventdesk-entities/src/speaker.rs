#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Speaker {
    pub name: String,
    pub bio: String,
    pub photo: Option<String>,
}

impl Speaker {
    pub fn new(name: impl Into<String>, bio: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bio: bio.into(),
            photo: None,
        }
    }
}
