use std::fmt;

/// Terrain class of a point, derived from the signs of its coordinates.
///
/// The positive quadrants are land, the strictly negative quadrant is sea,
/// and the non-positive axes bordering the sea are coast.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Category {
    Land,
    Sea,
    Coastal,
}

impl Category {
    /// Two categories may share a spanning-tree edge when they match or when
    /// either side is coast.
    pub fn connects(self, other: Self) -> bool {
        self == other || self == Self::Coastal || other == Self::Coastal
    }
}

/// Input point. Identity is its position in the input order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn category(self) -> Category {
        if self.x > 0 || self.y > 0 {
            Category::Land
        } else if self.x < 0 && self.y < 0 {
            Category::Sea
        } else {
            Category::Coastal
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, Point};

    #[test]
    fn any_positive_component_is_land() {
        assert_eq!(Point::new(3, -8).category(), Category::Land);
        assert_eq!(Point::new(-8, 3).category(), Category::Land);
        assert_eq!(Point::new(0, 1).category(), Category::Land);
        assert_eq!(Point::new(1, 0).category(), Category::Land);
    }

    #[test]
    fn strictly_negative_quadrant_is_sea() {
        assert_eq!(Point::new(-1, -1).category(), Category::Sea);
        assert_eq!(Point::new(-40, -2).category(), Category::Sea);
    }

    #[test]
    fn non_positive_axes_are_coastal() {
        assert_eq!(Point::new(0, 0).category(), Category::Coastal);
        assert_eq!(Point::new(0, -5).category(), Category::Coastal);
        assert_eq!(Point::new(-5, 0).category(), Category::Coastal);
    }

    #[test]
    fn coast_bridges_land_and_sea() {
        assert!(Category::Land.connects(Category::Land));
        assert!(Category::Sea.connects(Category::Sea));
        assert!(Category::Land.connects(Category::Coastal));
        assert!(Category::Coastal.connects(Category::Sea));
        assert!(!Category::Land.connects(Category::Sea));
        assert!(!Category::Sea.connects(Category::Land));
    }

    #[test]
    fn display_is_space_separated() {
        assert_eq!(Point::new(-4, 12).to_string(), "-4 12");
    }
}
