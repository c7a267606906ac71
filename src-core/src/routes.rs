//! Route table and access rules
//!
//! Paths are hash fragments (`#/account`). Guests are sent to the login page
//! from protected routes; signed-in users skip the guest-only pages.

/// Application pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    ForgotPassword,
    Dashboard,
    OldLists,
    Account,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::ForgotPassword => "/forgot-password",
            Route::Dashboard => "/",
            Route::OldLists => "/old-lists",
            Route::Account => "/account",
        }
    }

    /// Link target, e.g. `#/login`
    pub fn href(&self) -> String {
        format!("#{}", self.path())
    }

    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim_end_matches('/');
        match path {
            "" => Some(Route::Dashboard),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            "/forgot-password" => Some(Route::ForgotPassword),
            "/old-lists" => Some(Route::OldLists),
            "/account" => Some(Route::Account),
            _ => None,
        }
    }

    /// Route from a location hash (`#/account`, `#account`, or empty)
    pub fn from_hash(hash: &str) -> Option<Route> {
        let path = hash.trim_start_matches('#');
        if path.starts_with('/') || path.is_empty() {
            Route::parse(path)
        } else {
            Route::parse(&format!("/{}", path))
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard | Route::OldLists | Route::Account)
    }

    pub fn is_guest_only(&self) -> bool {
        matches!(self, Route::Login | Route::Register | Route::ForgotPassword)
    }
}

/// What to show for a requested location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(Route),
}

impl Resolution {
    pub fn route(&self) -> Route {
        match self {
            Resolution::Render(route) | Resolution::Redirect(route) => *route,
        }
    }
}

/// Resolve a location hash for a visitor; redirects are followed to the end
pub fn resolve(hash: &str, authenticated: bool) -> Resolution {
    let requested = Route::from_hash(hash);
    let mut route = requested.unwrap_or(Route::Dashboard);
    let mut redirected = requested.is_none();

    if route.is_protected() && !authenticated {
        route = Route::Login;
        redirected = true;
    } else if route.is_guest_only() && authenticated {
        route = Route::Dashboard;
        redirected = true;
    }

    if redirected {
        Resolution::Redirect(route)
    } else {
        Resolution::Render(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paths() {
        assert_eq!(Route::from_hash(""), Some(Route::Dashboard));
        assert_eq!(Route::from_hash("#/"), Some(Route::Dashboard));
        assert_eq!(Route::from_hash("#/account"), Some(Route::Account));
        assert_eq!(Route::from_hash("#/old-lists/"), Some(Route::OldLists));
        assert_eq!(Route::from_hash("#login"), Some(Route::Login));
        assert_eq!(Route::from_hash("#/nowhere"), None);
    }

    #[test]
    fn test_round_trip_href() {
        for route in [
            Route::Login,
            Route::Register,
            Route::ForgotPassword,
            Route::Dashboard,
            Route::OldLists,
            Route::Account,
        ] {
            assert_eq!(Route::from_hash(&route.href()), Some(route));
        }
    }

    #[test]
    fn test_guest_redirected_to_login() {
        assert_eq!(resolve("#/account", false), Resolution::Redirect(Route::Login));
        assert_eq!(resolve("#/", false), Resolution::Redirect(Route::Login));
        assert_eq!(resolve("#/register", false), Resolution::Render(Route::Register));
    }

    #[test]
    fn test_signed_in_skips_guest_pages() {
        assert_eq!(resolve("#/login", true), Resolution::Redirect(Route::Dashboard));
        assert_eq!(resolve("#/account", true), Resolution::Render(Route::Account));
    }

    #[test]
    fn test_unknown_path_goes_home() {
        assert_eq!(resolve("#/nowhere", true), Resolution::Redirect(Route::Dashboard));
        assert_eq!(resolve("#/nowhere", false), Resolution::Redirect(Route::Login));
    }
}
