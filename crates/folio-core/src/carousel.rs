//! Slide pagination for the project gallery.
//!
//! The carousel holds one slide per project plus a terminal "more projects"
//! slide. Navigation is clamped at both ends: stepping past either bound is a
//! silent no-op, never a wraparound.

use crate::viewer::ViewerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Backward,
    Forward,
}

impl NavDirection {
    pub fn signum(&self) -> isize {
        match self {
            Self::Backward => -1,
            Self::Forward => 1,
        }
    }

    /// Horizontal offset, in viewport widths, the entering slide starts from.
    /// Forward navigation brings content in from the right.
    pub fn enter_offset(&self) -> f64 {
        self.signum() as f64
    }

    /// Offset the leaving slide animates towards.
    pub fn exit_offset(&self) -> f64 {
        -self.enter_offset()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slide {
    Project(usize),
    MoreProjects,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub direction: NavDirection,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    project_count: usize,
    index: usize,
    direction: Option<NavDirection>,
    viewer_open: bool,
}

impl Carousel {
    pub fn new(project_count: usize) -> Self {
        Self {
            project_count,
            index: 0,
            direction: None,
            viewer_open: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn direction(&self) -> Option<NavDirection> {
        self.direction
    }

    pub fn total_slides(&self) -> usize {
        self.project_count + 1
    }

    pub fn slide(&self) -> Slide {
        if self.index < self.project_count {
            Slide::Project(self.index)
        } else {
            Slide::MoreProjects
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index < self.project_count
    }

    pub fn goto(&mut self, direction: NavDirection) -> Option<Transition> {
        let next = self.index.checked_add_signed(direction.signum())?;
        if next > self.project_count {
            return None;
        }

        let transition = Transition {
            from: self.index,
            to: next,
            direction,
        };
        self.index = next;
        self.direction = Some(direction);
        log::debug!("carousel {} -> {}", transition.from, transition.to);
        Some(transition)
    }

    /// Arrow keys page through slides unless the image viewer owns input.
    pub fn handle_key(&mut self, key: NavKey) -> Option<Transition> {
        if self.viewer_open {
            return None;
        }
        match key {
            NavKey::Left => self.goto(NavDirection::Backward),
            NavKey::Right => self.goto(NavDirection::Forward),
        }
    }

    pub fn on_viewer_event(&mut self, event: ViewerEvent) {
        self.viewer_open = matches!(event, ViewerEvent::Opened);
    }

    pub fn viewer_open(&self) -> bool {
        self.viewer_open
    }

    /// Back button, arrows and counter are hidden while the viewer is up.
    pub fn chrome_visible(&self) -> bool {
        !self.viewer_open
    }

    pub fn position_label(&self) -> String {
        format!("{:02} / {:02}", self.index + 1, self.total_slides())
    }
}
