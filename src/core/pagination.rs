//! Pagination and sorting primitives shared by the repository, service and
//! controller layers.
//!
//! A `PageRequest` is always normalized on construction: page is 0-based,
//! size falls back to [`DEFAULT_PAGE_SIZE`] when below 1 and is capped at
//! [`MAX_PAGE_SIZE`]. Sort columns only ever come from [`SortProperty::column`].

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::core::{AppError, Result};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(format!("Invalid sort direction: {}", other)),
        }
    }
}

/// Properties a parking spot page can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortProperty {
    #[default]
    Id,
    SpotNumber,
    LicensePlate,
    Brand,
    Model,
    Color,
    RegistrationDate,
    ResponsibleName,
    Apartment,
    Block,
}

impl SortProperty {
    /// Backing column name
    pub fn column(&self) -> &'static str {
        match self {
            SortProperty::Id => "id",
            SortProperty::SpotNumber => "spot_number",
            SortProperty::LicensePlate => "license_plate",
            SortProperty::Brand => "brand",
            SortProperty::Model => "model",
            SortProperty::Color => "color",
            SortProperty::RegistrationDate => "registration_date",
            SortProperty::ResponsibleName => "responsible_name",
            SortProperty::Apartment => "apartment",
            SortProperty::Block => "block",
        }
    }

    /// Wire (JSON) name
    pub fn as_str(&self) -> &'static str {
        match self {
            SortProperty::Id => "id",
            SortProperty::SpotNumber => "spotNumber",
            SortProperty::LicensePlate => "licensePlate",
            SortProperty::Brand => "brand",
            SortProperty::Model => "model",
            SortProperty::Color => "color",
            SortProperty::RegistrationDate => "registrationDate",
            SortProperty::ResponsibleName => "responsibleName",
            SortProperty::Apartment => "apartment",
            SortProperty::Block => "block",
        }
    }
}

impl fmt::Display for SortProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortProperty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(SortProperty::Id),
            "spotNumber" => Ok(SortProperty::SpotNumber),
            "licensePlate" => Ok(SortProperty::LicensePlate),
            "brand" => Ok(SortProperty::Brand),
            "model" => Ok(SortProperty::Model),
            "color" => Ok(SortProperty::Color),
            "registrationDate" => Ok(SortProperty::RegistrationDate),
            "responsibleName" => Ok(SortProperty::ResponsibleName),
            "apartment" => Ok(SortProperty::Apartment),
            "block" => Ok(SortProperty::Block),
            other => Err(format!("Unknown sort property: {}", other)),
        }
    }
}

/// Ordering of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Sort {
    pub property: SortProperty,
    pub direction: Direction,
}

impl Sort {
    pub fn new(property: SortProperty, direction: Direction) -> Self {
        Self {
            property,
            direction,
        }
    }

    /// Parse `property` or `property,direction`
    pub fn parse(raw: &str) -> Result<Self> {
        let mut parts = raw.splitn(2, ',');
        let property = parts
            .next()
            .unwrap_or_default()
            .parse::<SortProperty>()
            .map_err(|e| AppError::invalid_field("sort", e))?;

        let direction = match parts.next() {
            Some(d) if !d.trim().is_empty() => d
                .parse::<Direction>()
                .map_err(|e| AppError::invalid_field("sort", e))?,
            _ => Direction::Asc,
        };

        Ok(Self::new(property, direction))
    }

    /// ORDER BY body. Non-id orderings get `id ASC` appended so pages are stable.
    pub fn order_by_clause(&self) -> String {
        match self.property {
            SortProperty::Id => format!("id {}", self.direction.as_sql()),
            property => format!("{} {}, id ASC", property.column(), self.direction.as_sql()),
        }
    }
}

/// A normalized page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

impl PageRequest {
    pub fn new(page: u32, size: u32, sort: Sort) -> Self {
        let size = if size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            size.min(MAX_PAGE_SIZE)
        };

        Self { page, size, sort }
    }

    /// Build from raw query values; absent values take the defaults
    /// (page 0, size 10, `id,asc`).
    pub fn from_query(page: Option<i64>, size: Option<i64>, sort: Option<&str>) -> Result<Self> {
        let page = page.unwrap_or(0).clamp(0, u32::MAX as i64) as u32;
        let size = size
            .unwrap_or(DEFAULT_PAGE_SIZE as i64)
            .clamp(0, MAX_PAGE_SIZE as i64) as u32;
        let sort = match sort {
            Some(raw) if !raw.trim().is_empty() => Sort::parse(raw)?,
            _ => Sort::default(),
        };

        Ok(Self::new(page, size, sort))
    }

    pub fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE, Sort::default())
    }
}

/// A slice of the full record set plus the metadata needed to page through it
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub request: PageRequest,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            request,
            total_elements,
        }
    }

    pub fn number(&self) -> u32 {
        self.request.page
    }

    pub fn size(&self) -> u32 {
        self.request.size
    }

    pub fn total_pages(&self) -> u64 {
        let size = self.request.size as u64;
        if size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(size)
    }

    pub fn is_first(&self) -> bool {
        self.request.page == 0
    }

    pub fn is_last(&self) -> bool {
        self.request.page as u64 + 1 >= self.total_pages()
    }

    /// Convert the content, keeping the page metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            request: self.request,
            total_elements: self.total_elements,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageBody<'a, T> {
    content: &'a [T],
    pageable: PageableBody,
    total_elements: u64,
    total_pages: u64,
    number: u32,
    size: u32,
    number_of_elements: usize,
    first: bool,
    last: bool,
    empty: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageableBody {
    page_number: u32,
    page_size: u32,
    offset: u64,
    sort: Sort,
}

impl<T: Serialize> Serialize for Page<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        PageBody {
            content: &self.content,
            pageable: PageableBody {
                page_number: self.request.page,
                page_size: self.request.size,
                offset: self.request.offset(),
                sort: self.request.sort,
            },
            total_elements: self.total_elements,
            total_pages: self.total_pages(),
            number: self.number(),
            size: self.size(),
            number_of_elements: self.content.len(),
            first: self.is_first(),
            last: self.is_last(),
            empty: self.content.is_empty(),
        }
        .serialize(serializer)
    }
}
