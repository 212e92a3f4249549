//! Pointer gestures to graph actions.
//!
//! The machine has two connection states. `Idle` waits for a node click;
//! `Connecting(n)` waits for a second node to join to `n`. Alongside that it
//! tracks the weight editor popup, an in-progress node drag and the time of
//! the last drag release, which is used to drop the click a toolkit fires
//! when a drag ends.

use crate::actions::Action;
use crate::config::EditorConfig;
use crate::geometry::{DragBounds, Point, Vector};
use crate::graph::{EditorGraph, NodeSlot, random_weight};
use crate::hit::Hit;
use rand::Rng;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Idle,
    /// A node is armed; the next click on another node joins the two.
    Connecting(NodeSlot),
}

/// Toolkit-neutral pointer input, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    DoubleClick { at: Point },
    Click { at: Point },
    /// Secondary (right) click.
    ContextMenu { at: Point },
    /// `at` is where the pointer went down, not where the drag was detected.
    DragStart { at: Point },
    Drag { delta: Vector },
    DragStop,
    PointerMove { at: Point },
}

impl Gesture {
    /// The position to hit-test, for gestures that carry one.
    pub fn position(&self) -> Option<Point> {
        match *self {
            Gesture::DoubleClick { at }
            | Gesture::Click { at }
            | Gesture::ContextMenu { at }
            | Gesture::DragStart { at } => Some(at),
            Gesture::Drag { .. } | Gesture::DragStop | Gesture::PointerMove { .. } => None,
        }
    }
}

/// The open weight popup: which edge it edits and where it is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightEditor {
    pub edge: usize,
    pub anchor: Point,
}

#[derive(Debug, Clone, PartialEq)]
struct DragSession {
    slot: NodeSlot,
    start_offset: Vector,
    travel: Vector,
    bounds: DragBounds,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interaction {
    connection: ConnectionState,
    weight_editor: Option<WeightEditor>,
    drag: Option<DragSession>,
    drag_released_at: Option<f64>,
    pointer: Option<Point>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection(&self) -> ConnectionState {
        self.connection
    }

    pub fn active_node(&self) -> Option<NodeSlot> {
        match self.connection {
            ConnectionState::Idle => None,
            ConnectionState::Connecting(slot) => Some(slot),
        }
    }

    pub fn weight_editor(&self) -> Option<WeightEditor> {
        self.weight_editor
    }

    pub fn close_weight_editor(&mut self) {
        self.weight_editor = None;
    }

    /// Last pointer position seen over the canvas.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn dragging(&self) -> Option<NodeSlot> {
        self.drag.as_ref().map(|session| session.slot)
    }

    /// True while a drag is in progress or a release happened too recently
    /// for a click to be a deliberate selection.
    pub fn click_suppressed(&self, now: f64, config: &EditorConfig) -> bool {
        if self.drag.is_some() {
            return true;
        }
        self.drag_released_at
            .is_some_and(|t| now - t <= config.interaction.click_suppression_secs)
    }

    /// Interpret one gesture against the current state.
    ///
    /// UI state changes are applied directly; graph changes are returned as
    /// actions for the caller to apply.
    pub fn handle<R: Rng + ?Sized>(
        &mut self,
        gesture: Gesture,
        hit: Hit,
        now: f64,
        graph: &EditorGraph,
        config: &EditorConfig,
        rng: &mut R,
    ) -> Vec<Action> {
        match gesture {
            Gesture::PointerMove { at } => {
                self.pointer = Some(at);
                vec![]
            }
            Gesture::DoubleClick { at } => self.on_double_click(at, hit),
            Gesture::Click { .. } => self.on_click(hit, now, config, rng, graph),
            Gesture::ContextMenu { .. } => self.on_context_menu(hit),
            Gesture::DragStart { .. } => {
                self.on_drag_start(hit, graph, config);
                vec![]
            }
            Gesture::Drag { delta } => self.on_drag(delta, graph),
            Gesture::DragStop => {
                if let Some(session) = self.drag.take() {
                    log::trace!("drag of node {} released", session.slot);
                    self.drag_released_at = Some(now);
                }
                vec![]
            }
        }
    }

    fn on_double_click(&mut self, at: Point, hit: Hit) -> Vec<Action> {
        match hit {
            Hit::Canvas => vec![Action::AddNode { at }],
            Hit::Edge(edge) => {
                log::trace!("weight editor opened for edge {edge}");
                self.weight_editor = Some(WeightEditor { edge, anchor: at });
                vec![]
            }
            Hit::Node(_) => vec![],
        }
    }

    fn on_click<R: Rng + ?Sized>(
        &mut self,
        hit: Hit,
        now: f64,
        config: &EditorConfig,
        rng: &mut R,
        graph: &EditorGraph,
    ) -> Vec<Action> {
        let slot = match hit {
            Hit::Node(slot) => slot,
            Hit::Edge(_) | Hit::Canvas => {
                self.weight_editor = None;
                return vec![];
            }
        };
        if self.click_suppressed(now, config) {
            log::trace!("click on node {slot} suppressed after drag");
            return vec![];
        }
        if !graph.is_live(slot) {
            return vec![];
        }

        match self.connection {
            ConnectionState::Idle => {
                log::trace!("connecting from node {slot}");
                self.connection = ConnectionState::Connecting(slot);
                vec![]
            }
            ConnectionState::Connecting(active) if active == slot => vec![],
            ConnectionState::Connecting(active) => {
                log::trace!("connecting node {slot} to {active}");
                self.connection = ConnectionState::Idle;
                vec![Action::AddEdge {
                    a: slot,
                    b: active,
                    weight: random_weight(&config.weights, rng),
                }]
            }
        }
    }

    fn on_context_menu(&mut self, hit: Hit) -> Vec<Action> {
        // Edge positions may compact, so the editor never outlives a removal.
        self.weight_editor = None;
        match hit {
            Hit::Node(slot) => {
                if self.connection == ConnectionState::Connecting(slot) {
                    self.connection = ConnectionState::Idle;
                }
                if self.dragging() == Some(slot) {
                    self.drag = None;
                }
                vec![Action::RemoveNode { slot }]
            }
            Hit::Edge(edge) => vec![Action::RemoveEdges {
                positions: BTreeSet::from([edge]),
            }],
            Hit::Canvas => {
                if self.connection != ConnectionState::Idle {
                    log::trace!("connection cancelled");
                }
                self.connection = ConnectionState::Idle;
                vec![]
            }
        }
    }

    fn on_drag_start(&mut self, hit: Hit, graph: &EditorGraph, config: &EditorConfig) {
        let Hit::Node(slot) = hit else {
            return;
        };
        if self.connection != ConnectionState::Idle {
            log::trace!("drag of node {slot} ignored while connecting");
            return;
        }
        let Some(node) = graph.node(slot) else {
            return;
        };
        self.weight_editor = None;
        self.drag = Some(DragSession {
            slot,
            start_offset: node.offset,
            travel: Vector::ZERO,
            bounds: DragBounds::for_base(node.base, config),
        });
    }

    fn on_drag(&mut self, delta: Vector, graph: &EditorGraph) -> Vec<Action> {
        let Some(session) = self.drag.as_mut() else {
            return vec![];
        };
        let Some(node) = graph.node(session.slot) else {
            self.drag = None;
            return vec![];
        };
        session.travel += delta;
        let target = session.bounds.clamp(session.start_offset + session.travel);
        let step = target - node.offset;
        if step == Vector::ZERO {
            return vec![];
        }
        vec![Action::MoveNode {
            slot: session.slot,
            delta: step,
        }]
    }
}
