//! Components and props: one reusable card, several instances.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seniority {
    Junior,
    Senior,
}

impl Seniority {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Junior => "Junior",
            Self::Senior => "Senior",
        }
    }
}

/// Props of a user card. `role` is optional and defaults to "Developer".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCard {
    pub name: String,
    pub role: Option<String>,
    pub years_experience: u32,
}

impl UserCard {
    pub fn new(name: impl Into<String>, years_experience: u32) -> Self {
        Self {
            name: name.into(),
            role: None,
            years_experience,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn role(&self) -> &str {
        self.role.as_deref().unwrap_or("Developer")
    }

    pub fn seniority(&self) -> Seniority {
        if self.years_experience > 2 {
            Seniority::Senior
        } else {
            Seniority::Junior
        }
    }

    pub fn greeting(&self) -> String {
        format!("Hello, I am {}!", self.name)
    }
}

pub fn sample_cards() -> Vec<UserCard> {
    vec![
        UserCard::new("Alice", 5).with_role("Frontend Lead"),
        UserCard::new("Bob", 1),
        UserCard::new("Charlie", 8).with_role("Product Manager"),
    ]
}
