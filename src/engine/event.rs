use crate::model::{Coord, Feature};

/// Geographic camera position reported by the host's viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    pub is_dragging: bool,
    pub is_zooming: bool,
    pub is_panning: bool,
}

impl InteractionState {
    pub fn any(&self) -> bool {
        self.is_dragging || self.is_zooming || self.is_panning
    }
}

/// One pointer/viewport event from the host, each variant carrying
/// only the fields it needs.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Click {
        coordinate: Coord,
        feature: Option<Feature>,
    },
    Hover {
        coordinate: Coord,
        feature: Option<Feature>,
    },
    DragStart {
        coordinate: Coord,
        feature: Option<Feature>,
    },
    Drag {
        coordinate: Coord,
        feature: Option<Feature>,
    },
    DragStop,
    ViewStateChange {
        view: ViewState,
        old_view: ViewState,
        interaction: InteractionState,
    },
}

/// Outward notification produced by `BboxEngine::handle`. The host is
/// responsible for persisting the emitted points.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Committed corners changed: one anchor point or four corners.
    BboxChanged {
        points: Vec<Coord>,
        area_km2: Option<f64>,
    },
    /// Explicit clear wiped the committed corners.
    BboxCleared,
}
