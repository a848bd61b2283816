/// Which edge of the column axis absorbs a crop or pad.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    #[default]
    Centered,
    Left,
    Right,
}

/// Which edge of the row axis absorbs a crop or pad.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalAlignment {
    #[default]
    Centered,
    Top,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Edge {
    Centered,
    Leading,
    Trailing,
}

impl From<HorizontalAlignment> for Edge {
    fn from(alignment: HorizontalAlignment) -> Self {
        match alignment {
            HorizontalAlignment::Centered => Edge::Centered,
            HorizontalAlignment::Left => Edge::Leading,
            HorizontalAlignment::Right => Edge::Trailing,
        }
    }
}

impl From<VerticalAlignment> for Edge {
    fn from(alignment: VerticalAlignment) -> Self {
        match alignment {
            VerticalAlignment::Centered => Edge::Centered,
            VerticalAlignment::Top => Edge::Leading,
            VerticalAlignment::Bottom => Edge::Trailing,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    SlicePosition,
    InstanceNumber,
    None,
}
