//! Arena of script-created widgets.
//!
//! Widgets are stored in creation order and addressed by
//! [`WidgetHandle`], which is simply the slot index. There is no removal
//! path, so a handle stays valid for the rest of the session.

use paxo_common::{Rect, WidgetHandle};
use paxo_widgets::{Widget, WidgetKind};
use tracing::debug;

use crate::error::BridgeError;

#[derive(Debug)]
struct Slot {
    widget: Box<dyn Widget>,
    parent: Option<WidgetHandle>,
    children: Vec<WidgetHandle>,
}

/// Owns every widget of one session.
#[derive(Debug, Default)]
pub struct Registry {
    slots: Vec<Slot>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a widget and append it, attached to `parent` when given.
    ///
    /// The parent is resolved before anything is built, so a bad parent
    /// leaves the registry untouched.
    pub fn create(
        &mut self,
        kind: WidgetKind,
        rect: Rect,
        parent: Option<WidgetHandle>,
    ) -> Result<WidgetHandle, BridgeError> {
        if let Some(parent) = parent {
            self.resolve(parent)?;
        }
        let handle = u32::try_from(self.slots.len())
            .map(WidgetHandle)
            .map_err(|_| BridgeError::RegistryFull)?;

        self.slots.push(Slot {
            widget: paxo_widgets::build(kind, rect),
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.slots[parent.index()].children.push(handle);
        }

        debug!(%handle, %kind, parent = ?parent, "widget created");
        Ok(handle)
    }

    pub fn resolve(&self, handle: WidgetHandle) -> Result<&dyn Widget, BridgeError> {
        self.slots
            .get(handle.index())
            .map(|slot| slot.widget.as_ref())
            .ok_or_else(|| BridgeError::InvalidHandle(handle.0.to_string()))
    }

    pub fn resolve_mut(&mut self, handle: WidgetHandle) -> Result<&mut dyn Widget, BridgeError> {
        match self.slots.get_mut(handle.index()) {
            Some(slot) => Ok(slot.widget.as_mut()),
            None => Err(BridgeError::InvalidHandle(handle.0.to_string())),
        }
    }

    pub fn contains(&self, handle: WidgetHandle) -> bool {
        handle.index() < self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn parent(&self, handle: WidgetHandle) -> Result<Option<WidgetHandle>, BridgeError> {
        self.slot(handle).map(|slot| slot.parent)
    }

    pub fn children(&self, handle: WidgetHandle) -> Result<&[WidgetHandle], BridgeError> {
        self.slot(handle).map(|slot| slot.children.as_slice())
    }

    pub fn handles(&self) -> impl Iterator<Item = WidgetHandle> + '_ {
        (0..self.slots.len()).map(|i| WidgetHandle(i as u32))
    }

    /// Screen rectangle of a widget. Child coordinates are relative to
    /// their parent.
    pub fn absolute_rect(&self, handle: WidgetHandle) -> Result<Rect, BridgeError> {
        let mut rect = self.resolve(handle)?.rect();
        let (mut x, mut y) = (u32::from(rect.x), u32::from(rect.y));
        let mut cursor = self.slot(handle)?.parent;
        while let Some(parent) = cursor {
            let slot = self.slot(parent)?;
            let parent_rect = slot.widget.rect();
            x += u32::from(parent_rect.x);
            y += u32::from(parent_rect.y);
            cursor = slot.parent;
        }
        rect.x = x.min(u32::from(u16::MAX)) as u16;
        rect.y = y.min(u32::from(u16::MAX)) as u16;
        Ok(rect)
    }

    /// Visible widgets under a screen point, front-most (latest created)
    /// first. A widget is only reachable if every ancestor is visible.
    pub fn hit_test(&self, px: u16, py: u16) -> Vec<WidgetHandle> {
        let mut hits: Vec<WidgetHandle> = self
            .handles()
            .filter(|&h| self.shown(h))
            .filter(|&h| {
                self.absolute_rect(h)
                    .map(|rect| rect.contains(px, py))
                    .unwrap_or(false)
            })
            .collect();
        hits.reverse();
        hits
    }

    fn shown(&self, handle: WidgetHandle) -> bool {
        let mut cursor = Some(handle);
        while let Some(h) = cursor {
            match self.slots.get(h.index()) {
                Some(slot) if slot.widget.is_visible() => cursor = slot.parent,
                _ => return false,
            }
        }
        true
    }

    /// Close the frame on every widget. Returns how many needed a redraw.
    pub fn end_frame(&mut self) -> usize {
        self.slots
            .iter_mut()
            .map(|slot| slot.widget.end_frame())
            .filter(|&dirty| dirty)
            .count()
    }

    fn slot(&self, handle: WidgetHandle) -> Result<&Slot, BridgeError> {
        self.slots
            .get(handle.index())
            .ok_or_else(|| BridgeError::InvalidHandle(handle.0.to_string()))
    }
}
