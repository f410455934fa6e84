use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of one object on the drawing surface
pub type StrokeId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathKind {
    Paint,
    Erase,
}

// Immutable record once committed to the surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StrokeRecord {
    Path {
        id: StrokeId,
        kind: PathKind,
        points: Vec<Pos2>,
        color: Color32,
        thickness: f32,
    },
    Fill {
        id: StrokeId,
        seed: Pos2,
        color: Color32,
    },
}

impl StrokeRecord {
    pub fn fill(seed: Pos2, color: Color32) -> Self {
        Self::Fill {
            id: Uuid::new_v4(),
            seed,
            color,
        }
    }

    pub fn id(&self) -> StrokeId {
        match self {
            Self::Path { id, .. } | Self::Fill { id, .. } => *id,
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            Self::Path { color, .. } | Self::Fill { color, .. } => *color,
        }
    }

    pub fn is_erase(&self) -> bool {
        matches!(
            self,
            Self::Path {
                kind: PathKind::Erase,
                ..
            }
        )
    }
}

// Mutable stroke for the path currently being drawn
#[derive(Debug, Clone)]
pub struct MutableStroke {
    kind: PathKind,
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

impl MutableStroke {
    pub fn new(kind: PathKind, color: Color32, thickness: f32) -> Self {
        Self {
            kind,
            points: Vec::new(),
            color,
            thickness,
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        // Skip duplicates from pointers that report without moving
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    /// Preview of the in-progress path, sharing the committed record's shape
    pub fn to_preview(&self) -> StrokeRecord {
        StrokeRecord::Path {
            id: Uuid::nil(),
            kind: self.kind,
            points: self.points.clone(),
            color: self.color,
            thickness: self.thickness,
        }
    }

    // Convert to an immutable record with a fresh id
    pub fn into_record(self) -> StrokeRecord {
        StrokeRecord::Path {
            id: Uuid::new_v4(),
            kind: self.kind,
            points: self.points,
            color: self.color,
            thickness: self.thickness,
        }
    }
}
