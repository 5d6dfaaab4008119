use crate::identity::Session;

/// Every client-side screen the console knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Root,
    Login,
    Register,
    Messages,
    CreateMessage,
    Stores,
    Products,
    Suppliers,
    Credits,
    Returns,
    Reports,
    ServiceStatus,
    Admin,
}

impl Screen {
    pub const ALL: [Screen; 13] = [
        Screen::Root,
        Screen::Login,
        Screen::Register,
        Screen::Messages,
        Screen::CreateMessage,
        Screen::Stores,
        Screen::Products,
        Screen::Suppliers,
        Screen::Credits,
        Screen::Returns,
        Screen::Reports,
        Screen::ServiceStatus,
        Screen::Admin,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Screen::Root => "/",
            Screen::Login => "/login",
            Screen::Register => "/register",
            Screen::Messages => "/messages",
            Screen::CreateMessage => "/messages/create",
            Screen::Stores => "/stores",
            Screen::Products => "/products",
            Screen::Suppliers => "/suppliers",
            Screen::Credits => "/credits",
            Screen::Returns => "/returns",
            Screen::Reports => "/reports",
            Screen::ServiceStatus => "/service-status",
            Screen::Admin => "/admin",
        }
    }

    /// Resolve a path, ignoring a trailing slash.
    pub fn from_path(path: &str) -> Option<Screen> {
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|s| s.path() == path)
    }

    /// Everything except the sign-in screens (and the root redirect) needs a session.
    pub fn requires_session(&self) -> bool {
        !matches!(self, Screen::Root | Screen::Login | Screen::Register)
    }

    /// Screens that only render the "under construction" placeholder.
    pub fn is_placeholder(&self) -> bool {
        !matches!(
            self,
            Screen::Root | Screen::Login | Screen::Register | Screen::Messages | Screen::CreateMessage
        )
    }
}

/// Sidebar entry in the navigation shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub name: &'static str,
    pub screen: Screen,
}

impl MenuItem {
    /// Highlighted only on an exact path match.
    pub fn is_active(&self, current: Screen) -> bool {
        self.screen == current
    }
}

pub const MENU: [MenuItem; 9] = [
    MenuItem { name: "Messages", screen: Screen::Messages },
    MenuItem { name: "Stores", screen: Screen::Stores },
    MenuItem { name: "Products", screen: Screen::Products },
    MenuItem { name: "Suppliers", screen: Screen::Suppliers },
    MenuItem { name: "Credits", screen: Screen::Credits },
    MenuItem { name: "Returns", screen: Screen::Returns },
    MenuItem { name: "Reports", screen: Screen::Reports },
    MenuItem { name: "Service Status", screen: Screen::ServiceStatus },
    MenuItem { name: "Admin", screen: Screen::Admin },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Render(Screen),
    Redirect(Screen),
}

/// Decide what to show for `requested` given the current session.
///
/// Unauthenticated visits to protected screens go to the login screen; the
/// requested path is not remembered.
pub fn gate(requested: Screen, session: Option<&Session>) -> GateDecision {
    match (requested, session) {
        (Screen::Root, _) => GateDecision::Redirect(Screen::Login),
        (screen, None) if screen.requires_session() => GateDecision::Redirect(Screen::Login),
        (Screen::Login | Screen::Register, Some(_)) => GateDecision::Redirect(Screen::Messages),
        (screen, _) => GateDecision::Render(screen),
    }
}
