//! URL-style paths for the top-level pages.

use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Ideas,
    Analytics,
    Categories,
    Templates,
    Faq,
    NotFound(String),
}

impl Route {
    /// Pages shown in the navbar, in order.
    pub const NAV: [Route; 6] = [
        Route::Landing,
        Route::Ideas,
        Route::Analytics,
        Route::Categories,
        Route::Templates,
        Route::Faq,
    ];

    pub fn from_path(path: &str) -> Route {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        match normalized {
            "" | "/" => Route::Landing,
            "/ideas" => Route::Ideas,
            "/analytics" => Route::Analytics,
            "/categories" => Route::Categories,
            "/templates" => Route::Templates,
            "/faq" => Route::Faq,
            other => Route::NotFound(other.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Landing => "/",
            Route::Ideas => "/ideas",
            Route::Analytics => "/analytics",
            Route::Categories => "/categories",
            Route::Templates => "/templates",
            Route::Faq => "/faq",
            Route::NotFound(path) => path.as_str(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Landing => "Home",
            Route::Ideas => "Ideas",
            Route::Analytics => "Analytics",
            Route::Categories => "Categories",
            Route::Templates => "Templates",
            Route::Faq => "FAQ",
            Route::NotFound(_) => "Not Found",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Route::Landing => Color::Cyan,
            Route::Ideas => Color::Green,
            Route::Analytics => Color::Magenta,
            Route::Categories => Color::Yellow,
            Route::Templates => Color::LightBlue,
            Route::Faq => Color::LightMagenta,
            Route::NotFound(_) => Color::Red,
        }
    }

    /// Next navbar page; unknown pages jump back to the start.
    pub fn next(&self) -> Route {
        match Self::NAV.iter().position(|r| r == self) {
            Some(idx) => Self::NAV[(idx + 1) % Self::NAV.len()].clone(),
            None => Route::Landing,
        }
    }

    pub fn prev(&self) -> Route {
        match Self::NAV.iter().position(|r| r == self) {
            Some(idx) => Self::NAV[(idx + Self::NAV.len() - 1) % Self::NAV.len()].clone(),
            None => Route::Landing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths() {
        assert_eq!(Route::from_path("/"), Route::Landing);
        assert_eq!(Route::from_path("/ideas"), Route::Ideas);
        assert_eq!(Route::from_path("/ideas/"), Route::Ideas);
        assert_eq!(Route::from_path("/analytics"), Route::Analytics);
        assert_eq!(Route::from_path("/categories"), Route::Categories);
        assert_eq!(Route::from_path("/templates"), Route::Templates);
        assert_eq!(Route::from_path("/faq"), Route::Faq);
    }

    #[test]
    fn anything_else_is_not_found() {
        let route = Route::from_path("/nope");
        assert_eq!(route, Route::NotFound("/nope".to_string()));
        assert_eq!(route.path(), "/nope");
        assert_eq!(route.next(), Route::Landing);
    }

    #[test]
    fn paths_round_trip() {
        for route in Route::NAV.iter() {
            assert_eq!(&Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn nav_cycles() {
        assert_eq!(Route::Landing.next(), Route::Ideas);
        assert_eq!(Route::Faq.next(), Route::Landing);
        assert_eq!(Route::Landing.prev(), Route::Faq);
    }
}
