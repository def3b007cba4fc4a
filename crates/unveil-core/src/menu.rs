//! Mobile navigation drawer

/// Transform applied to each of the three hamburger lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HamburgerPose {
    pub top: &'static str,
    pub middle_opacity: &'static str,
    pub bottom: &'static str,
}

impl HamburgerPose {
    /// Three horizontal bars
    pub const BARS: Self = Self {
        top: "",
        middle_opacity: "1",
        bottom: "",
    };

    /// Bars folded into an X
    pub const CROSS: Self = Self {
        top: "rotate(45deg) translateY(8px)",
        middle_opacity: "0",
        bottom: "rotate(-45deg) translateY(-8px)",
    };
}

/// What the page should render for the current drawer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuView {
    /// Drawer carries its "active" class
    pub active: bool,
    pub aria_expanded: bool,
    /// Body overflow hidden while the drawer is open
    pub body_scroll_locked: bool,
    pub hamburger: HamburgerPose,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Default)]
pub struct MobileMenu {
    state: MenuState,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    pub fn open(&mut self) -> MenuView {
        self.state = MenuState::Open;
        self.view()
    }

    pub fn close(&mut self) -> MenuView {
        self.state = MenuState::Closed;
        self.view()
    }

    /// Hamburger button click
    pub fn toggle(&mut self) -> MenuView {
        if self.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    /// Document keydown. Returns the new view if the key closed the drawer.
    pub fn on_key(&mut self, key: &str) -> Option<MenuView> {
        if key == "Escape" && self.is_open() {
            Some(self.close())
        } else {
            None
        }
    }

    /// Click inside the drawer. Only clicks on the backdrop itself close it;
    /// clicks on links or content bubble up with `is_backdrop == false`.
    pub fn on_backdrop_click(&mut self, is_backdrop: bool) -> Option<MenuView> {
        if is_backdrop && self.is_open() {
            Some(self.close())
        } else {
            None
        }
    }

    pub fn view(&self) -> MenuView {
        let open = self.is_open();
        MenuView {
            active: open,
            aria_expanded: open,
            body_scroll_locked: open,
            hamburger: if open {
                HamburgerPose::CROSS
            } else {
                HamburgerPose::BARS
            },
        }
    }
}
