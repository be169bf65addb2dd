//! Route table and course navigation.
//!
//! Pages never own routing: they get a [`Navigate`] capability and ask it
//! to go somewhere by path.

/// A page of the course.
///
/// Paths are stable URLs: once published, do not rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Basics,
    State,
    Effects,
    Forms,
    Context,
    Hooks,
    Api,
    /// Wildcard entry for any unknown path.
    NotFound,
}

/// A "go here next" button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub route: Route,
    pub label: &'static str,
}

/// One line of the side menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub route: Route,
    pub label: &'static str,
    pub description: &'static str,
}

pub const HOME_LINK: NavLink = NavLink {
    route: Route::Home,
    label: "Back to Home",
};

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Basics => "/basics",
            Self::State => "/state",
            Self::Effects => "/effects",
            Self::Forms => "/forms",
            Self::Context => "/context",
            Self::Hooks => "/hooks",
            Self::Api => "/api",
            Self::NotFound => "*",
        }
    }

    /// Menu order. `NotFound` is not listed.
    pub fn all() -> &'static [Route] {
        &[
            Self::Home,
            Self::Basics,
            Self::State,
            Self::Effects,
            Self::Forms,
            Self::Context,
            Self::Hooks,
            Self::Api,
        ]
    }

    /// Resolve a location. Query strings, fragments and a trailing slash
    /// are ignored. Anything unknown is [`Route::NotFound`].
    pub fn parse(location: &str) -> Self {
        let path = normalize_path(location);
        Self::all()
            .iter()
            .copied()
            .find(|route| route.path() == path)
            .unwrap_or(Self::NotFound)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Basics => "1. Basics",
            Self::State => "2. State",
            Self::Effects => "3. Effects",
            Self::Forms => "4. Forms",
            Self::Context => "5. Context",
            Self::Hooks => "6. Hooks",
            Self::Api => "7. API",
            Self::NotFound => "Page Not Found",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Home => "Welcome",
            Self::Basics => "Components & Props",
            Self::State => "Local & Persisted State",
            Self::Effects => "Effect Lifecycle",
            Self::Forms => "Inputs & Validation",
            Self::Context => "Global State",
            Self::Hooks => "Advanced Logic",
            Self::Api => "Fetching Data",
            Self::NotFound => "The page you are looking for does not exist",
        }
    }

    /// The "next up" button at the bottom of the page.
    pub fn next(&self) -> Option<NavLink> {
        let link = |route: Route, label| Some(NavLink { route, label });
        match self {
            Self::Home => link(Self::Basics, "Start Learning"),
            Self::Basics => link(Self::State, Self::State.title()),
            Self::State => link(Self::Effects, Self::Effects.title()),
            Self::Effects => link(Self::Forms, Self::Forms.title()),
            Self::Forms => link(Self::Context, Self::Context.title()),
            Self::Context => link(Self::Hooks, Self::Hooks.title()),
            Self::Hooks => link(Self::Api, Self::Api.title()),
            Self::Api => link(Self::Home, "Review Home"),
            Self::NotFound => None,
        }
    }

    /// Every page except Home offers a way back.
    pub fn home_link(&self) -> Option<NavLink> {
        match self {
            Self::Home => None,
            _ => Some(HOME_LINK),
        }
    }
}

/// `location` without query, fragment or trailing slash. Empty is `/`.
pub fn normalize_path(location: &str) -> &str {
    let path = location.split(['?', '#']).next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

pub fn menu() -> Vec<MenuItem> {
    Route::all()
        .iter()
        .map(|&route| MenuItem {
            route,
            label: route.title(),
            description: route.description(),
        })
        .collect()
}

/// What a page needs from the router.
pub trait Navigate {
    fn navigate(&mut self, path: &str) -> Route;

    fn current_path(&self) -> &str;

    fn current_route(&self) -> Route {
        Route::parse(self.current_path())
    }

    fn follow(&mut self, link: NavLink) -> Route {
        self.navigate(link.route.path())
    }
}

/// In-process history stack.
#[derive(Debug, Clone)]
pub struct Navigator {
    history: Vec<String>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::starting_at(Route::Home.path())
    }

    pub fn starting_at(path: &str) -> Self {
        Self {
            history: vec![path.to_string()],
        }
    }

    /// Pop one entry. Stays put at the first entry.
    pub fn back(&mut self) -> Route {
        if self.history.len() > 1 {
            self.history.pop();
        }
        self.current_route()
    }

    /// Whether the menu entry for `route` should be highlighted.
    pub fn is_selected(&self, route: Route) -> bool {
        self.current_route() == route
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigate for Navigator {
    fn navigate(&mut self, path: &str) -> Route {
        let route = Route::parse(path);
        tracing::debug!(path, ?route, "navigate");
        if normalize_path(self.current_path()) != normalize_path(path) {
            self.history.push(path.to_string());
        }
        route
    }

    fn current_path(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or("/")
    }
}
