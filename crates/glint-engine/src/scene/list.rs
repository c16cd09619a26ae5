use crate::coords::{Rect, Vec2};
use crate::paint::BlendMode;

use super::{DrawCmd, LayerCmd, LayerKind, SortKey, ZIndex};

/// A single draw item: sort key + command + clip rect + blend mode.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
    /// Scissor rect in logical pixels. `None` = no clipping (draw everywhere).
    pub clip_rect: Option<Rect>,
    /// Operator used when this item lands on its target.
    pub blend: BlendMode,
}

/// Recorded draw stream for a frame, plus the canvas state used while recording.
///
/// Canvas state:
/// - translation: set with [`translate`](Self::translate), scoped with
///   [`save`](Self::save) / [`restore_to_count`](Self::restore_to_count).
///   Commands are stored already translated, so consumers never see a transform.
/// - clip: [`push_clip`](Self::push_clip) / [`pop_clip`](Self::pop_clip),
///   intersected with the parent clip.
/// - blend: [`push_blend`](Self::push_blend) / [`pop_blend`](Self::pop_blend).
/// - layers: [`begin_layer`](Self::begin_layer) / [`end_layer`](Self::end_layer).
///
/// ```ignore
/// let count = list.save();
/// list.translate(dx, 0.0);
/// list.push_rect(z, band, paint);
/// list.restore_to_count(count);
/// ```
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,

    translation: Vec2,
    /// Translations saved by `save()`; the current one is `translation`.
    save_stack: Vec<Vec2>,
    /// Effective clips, top already intersected with all parents.
    clip_stack: Vec<Rect>,
    blend_stack: Vec<BlendMode>,
    open_layers: usize,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and all canvas state. Keeps allocated capacity for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
        self.translation = Vec2::zero();
        self.save_stack.clear();
        self.clip_stack.clear();
        self.blend_stack.clear();
        self.open_layers = 0;
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes a draw command with the given z-index.
    ///
    /// The command is moved by the current translation and inherits the
    /// current clip rect and blend mode.
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd: cmd.translated(self.translation),
            clip_rect: self.clip_stack.last().copied(),
            blend: self.blend(),
        });

        self.sorted_dirty = true;
    }

    // ── transform ─────────────────────────────────────────────────────────

    /// Current translation applied to recorded geometry.
    #[inline]
    pub fn translation(&self) -> Vec2 {
        self.translation
    }

    /// Saves the current translation and returns the count to pass to
    /// [`restore_to_count`](Self::restore_to_count) to undo this save.
    pub fn save(&mut self) -> usize {
        let count = self.save_stack.len();
        self.save_stack.push(self.translation);
        count
    }

    /// Pops the most recent [`save`](Self::save).
    ///
    /// # Panics
    /// Panics (debug only) if called without a matching `save`.
    pub fn restore(&mut self) {
        debug_assert!(!self.save_stack.is_empty(), "restore called without matching save");
        if let Some(t) = self.save_stack.pop() {
            self.translation = t;
        }
    }

    /// Pops saves until exactly `count` remain.
    pub fn restore_to_count(&mut self, count: usize) {
        while self.save_stack.len() > count {
            self.restore();
        }
    }

    /// Adds `(dx, dy)` to the current translation.
    #[inline]
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.translation = self.translation + Vec2::new(dx, dy);
    }

    // ── clipping ──────────────────────────────────────────────────────────

    /// Begins a scissor region. All draw commands pushed until [`pop_clip`](Self::pop_clip)
    /// are clipped to `rect` (translated, then intersected with any parent clip rect).
    ///
    /// Calls must be balanced with `pop_clip`.
    pub fn push_clip(&mut self, rect: Rect) {
        let rect = rect.translated(self.translation);
        let effective = match self.clip_stack.last() {
            None => rect,
            // No overlap: zero-area rect, the renderer skips those draw calls.
            Some(&parent) => parent.intersect(rect).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0)),
        };
        self.clip_stack.push(effective);
    }

    /// Ends the most recent scissor region started by [`push_clip`](Self::push_clip).
    ///
    /// # Panics
    /// Panics (debug only) if called without a matching `push_clip`.
    #[inline]
    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip called without matching push_clip");
        self.clip_stack.pop();
    }

    // ── blending ──────────────────────────────────────────────────────────

    /// Blend mode new items inherit. `SrcOver` when nothing is pushed.
    #[inline]
    pub fn blend(&self) -> BlendMode {
        self.blend_stack.last().copied().unwrap_or_default()
    }

    #[inline]
    pub fn push_blend(&mut self, mode: BlendMode) {
        self.blend_stack.push(mode);
    }

    /// # Panics
    /// Panics (debug only) if called without a matching `push_blend`.
    #[inline]
    pub fn pop_blend(&mut self) {
        debug_assert!(!self.blend_stack.is_empty(), "pop_blend called without matching push_blend");
        self.blend_stack.pop();
    }

    // ── layers ────────────────────────────────────────────────────────────

    /// Opens an isolated compositing group over `bounds`.
    ///
    /// Must be balanced with [`end_layer`](Self::end_layer).
    pub fn begin_layer(&mut self, z: ZIndex, bounds: Rect, kind: LayerKind) {
        self.open_layers += 1;
        self.push(z, DrawCmd::BeginLayer(LayerCmd { bounds, kind }));
    }

    /// Closes the innermost layer.
    ///
    /// # Panics
    /// Panics (debug only) if no layer is open.
    pub fn end_layer(&mut self, z: ZIndex) {
        debug_assert!(self.open_layers > 0, "end_layer called without matching begin_layer");
        self.open_layers = self.open_layers.saturating_sub(1);
        self.push(z, DrawCmd::EndLayer);
    }

    /// Number of layers opened and not yet closed.
    #[inline]
    pub fn open_layers(&self) -> usize {
        self.open_layers
    }

    // ── ordering ──────────────────────────────────────────────────────────

    /// Returns indices into `items` in paint order (back-to-front).
    ///
    /// This buffer is owned by `DrawList` and reused across frames.
    pub fn indices_in_paint_order(&mut self) -> &[usize] {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }
        &self.sorted_indices
    }

    /// Iterates items in paint order without cloning draw commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // Stable ordering is ensured by SortKey including insertion order.
        let items = &self.items;
        self.sorted_indices.sort_by_key(|&i| items[i].key);

        self.sorted_dirty = false;
    }
}
