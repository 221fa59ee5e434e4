//! Frame collection and management.

use crate::id3v2::frames::{Frame, FrameKind, PictureFrame, PictureType};
use indexmap::map::Iter;
use indexmap::IndexMap;
use std::ops::{Deref, DerefMut, Index};

/// An ordered collection of frames, keyed by their [`FrameKind`](FrameKind).
///
/// Frames keep the order they were added in. Replacing a frame keeps its position, and
/// removing one keeps the order of everything else.
#[derive(Debug, Clone, Default)]
pub struct FrameMap {
    map: IndexMap<FrameKind, Box<dyn Frame>>,
    pictures: Vec<PictureType>,
}

impl FrameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `frame` under `kind`, or remove whatever is under `kind` if `frame` is `None`.
    /// Returns the frame that was there before.
    ///
    /// # Panics
    ///
    /// Panics if `frame` is not of kind `kind`.
    pub fn store(
        &mut self,
        kind: FrameKind,
        frame: Option<Box<dyn Frame>>,
    ) -> Option<Box<dyn Frame>> {
        match frame {
            Some(frame) => {
                assert_eq!(
                    frame.kind(),
                    kind,
                    "frame {} cannot be stored under another kind",
                    frame.id()
                );

                let old = self.map.insert(kind, frame);

                if let (None, FrameKind::Picture(picture_type)) = (&old, kind) {
                    self.pictures.push(picture_type);
                }

                old
            }

            None => {
                let old = self.map.shift_remove(&kind);

                if let (Some(_), FrameKind::Picture(picture_type)) = (&old, kind) {
                    self.pictures.retain(|&other| other != picture_type);
                }

                old
            }
        }
    }

    #[inline]
    pub fn insert(&mut self, frame: impl Frame) -> Option<Box<dyn Frame>> {
        self.insert_boxed(Box::new(frame))
    }

    pub fn insert_boxed(&mut self, frame: Box<dyn Frame>) -> Option<Box<dyn Frame>> {
        self.store(frame.kind(), Some(frame))
    }

    pub fn remove(&mut self, kind: &FrameKind) -> Option<Box<dyn Frame>> {
        self.store(*kind, None)
    }

    pub fn get(&self, kind: &FrameKind) -> Option<&dyn Frame> {
        Some(self.map.get(kind)?.deref())
    }

    pub fn get_mut(&mut self, kind: &FrameKind) -> Option<&mut dyn Frame> {
        Some(self.map.get_mut(kind)?.deref_mut())
    }

    /// Get the frame under `kind` as a concrete frame type.
    pub fn get_as<T: Frame>(&self, kind: &FrameKind) -> Option<&T> {
        self.map.get(kind)?.downcast::<T>()
    }

    pub fn get_as_mut<T: Frame>(&mut self, kind: &FrameKind) -> Option<&mut T> {
        self.map.get_mut(kind)?.downcast_mut::<T>()
    }

    pub fn contains(&self, kind: &FrameKind) -> bool {
        self.map.contains_key(kind)
    }

    pub fn picture(&self, picture_type: PictureType) -> Option<&PictureFrame> {
        self.get_as(&FrameKind::Picture(picture_type))
    }

    /// The pictures in this collection, in order.
    pub fn pictures(&self) -> impl Iterator<Item = &PictureFrame> + '_ {
        self.pictures
            .iter()
            .filter_map(move |&picture_type| self.picture(picture_type))
    }

    /// The picture types in this collection, in order.
    pub fn picture_types(&self) -> &[PictureType] {
        &self.pictures
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &FrameKind> + '_ {
        self.map.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &dyn Frame> + '_ {
        self.map.values().map(|frame| frame.deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FrameKind, &dyn Frame)> + '_ {
        self.map.iter().map(|(kind, frame)| (kind, frame.deref()))
    }
}

impl Index<&FrameKind> for FrameMap {
    type Output = dyn Frame;

    fn index(&self, kind: &FrameKind) -> &Self::Output {
        self.map[kind].deref()
    }
}

impl<'a> IntoIterator for &'a FrameMap {
    type Item = (&'a FrameKind, &'a Box<dyn Frame>);
    type IntoIter = Iter<'a, FrameKind, Box<dyn Frame>>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}
