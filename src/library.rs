use tracing::info;
use ulid::Ulid;

use crate::booking::{BookingError, BookingValidator};
use crate::map::{LibraryMap, MapError, Path, RouteError, SearchStrategy};
use crate::model::{Booking, Coord, Media, ModelError, Resource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    UnknownMedia(String),
    UnknownResource(String),
    DuplicateMedia(String),
    DuplicateResource(String),
    /// A resource already claims the cell this media would occupy.
    CellTaken(Coord),
    Map(MapError),
    Model(ModelError),
    Booking(BookingError),
    Route(RouteError),
}

impl std::fmt::Display for LibraryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LibraryError::UnknownMedia(t) => write!(f, "no media titled {t:?}"),
            LibraryError::UnknownResource(n) => write!(f, "no resource named {n:?}"),
            LibraryError::DuplicateMedia(t) => write!(f, "media {t:?} already exists"),
            LibraryError::DuplicateResource(n) => write!(f, "resource {n:?} already exists"),
            LibraryError::CellTaken(c) => write!(f, "cell {c} is occupied by a resource"),
            LibraryError::Map(e) => write!(f, "{e}"),
            LibraryError::Model(e) => write!(f, "{e}"),
            LibraryError::Booking(e) => write!(f, "{e}"),
            LibraryError::Route(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LibraryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LibraryError::Map(e) => Some(e),
            LibraryError::Model(e) => Some(e),
            LibraryError::Booking(e) => Some(e),
            LibraryError::Route(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MapError> for LibraryError {
    fn from(e: MapError) -> Self {
        LibraryError::Map(e)
    }
}

impl From<ModelError> for LibraryError {
    fn from(e: ModelError) -> Self {
        LibraryError::Model(e)
    }
}

impl From<BookingError> for LibraryError {
    fn from(e: BookingError) -> Self {
        LibraryError::Booking(e)
    }
}

impl From<RouteError> for LibraryError {
    fn from(e: RouteError) -> Self {
        LibraryError::Route(e)
    }
}

/// A library floor: its map plus the media and resources placed on it.
/// Titles and names are matched case-insensitively.
#[derive(Debug, Clone)]
pub struct Library {
    name: String,
    map: LibraryMap,
    media: Vec<Media>,
    resources: Vec<Resource>,
}

impl Library {
    pub fn new(name: impl Into<String>, map: LibraryMap) -> Self {
        Self {
            name: name.into(),
            map,
            media: Vec::new(),
            resources: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn map(&self) -> &LibraryMap {
        &self.map
    }

    pub fn media(&self) -> &[Media] {
        &self.media
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn add_media(&mut self, media: Media) -> Result<(), LibraryError> {
        if self.find_media(&media.title).is_some() {
            return Err(LibraryError::DuplicateMedia(media.title));
        }
        if !self.map.place_media(&media)? {
            return Err(LibraryError::CellTaken(media.coord));
        }
        info!(title = %media.title, coord = %media.coord, "media placed");
        self.media.push(media);
        Ok(())
    }

    /// Resources are not checked against existing placements.
    pub fn add_resource(&mut self, resource: Resource) -> Result<(), LibraryError> {
        if self.find_resource(resource.name()).is_some() {
            return Err(LibraryError::DuplicateResource(resource.name().to_string()));
        }
        self.map.place_resource(&resource)?;
        info!(name = resource.name(), cells = resource.coords().len(), "resource placed");
        self.resources.push(resource);
        Ok(())
    }

    pub fn find_media(&self, title: &str) -> Option<&Media> {
        self.media.iter().find(|m| m.title.eq_ignore_ascii_case(title))
    }

    pub fn find_resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name().eq_ignore_ascii_case(name))
    }

    pub fn resource_mut(&mut self, name: &str) -> Result<&mut Resource, LibraryError> {
        self.resources
            .iter_mut()
            .find(|r| r.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| LibraryError::UnknownResource(name.to_string()))
    }

    pub fn route_to_media(&self, title: &str, strategy: SearchStrategy) -> Result<Path, LibraryError> {
        let media = self
            .find_media(title)
            .ok_or_else(|| LibraryError::UnknownMedia(title.to_string()))?;
        Ok(self.map.route_to_media(media, strategy)?)
    }

    pub fn route_to_resource(&self, name: &str, strategy: SearchStrategy) -> Result<Path, LibraryError> {
        let resource = self
            .find_resource(name)
            .ok_or_else(|| LibraryError::UnknownResource(name.to_string()))?;
        Ok(self.map.route_to_resource(resource, strategy)?)
    }

    /// Book `resource` for `member` using kiosk-formatted date and time.
    pub fn book(
        &mut self,
        validator: &BookingValidator,
        resource: &str,
        member: &str,
        date: &str,
        time: &str,
    ) -> Result<Booking, LibraryError> {
        let rs = self.resource_mut(resource)?;
        Ok(validator.try_admit(rs, member, date, time)?)
    }

    pub fn cancel(
        &mut self,
        validator: &BookingValidator,
        resource: &str,
        id: Ulid,
    ) -> Result<Booking, LibraryError> {
        let rs = self.resource_mut(resource)?;
        Ok(validator.cancel(rs, id)?)
    }
}
