#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnsCount(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowIndex(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnIndex(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct PassagesCount(pub usize);

/// Viewport extent in host units (pixels for a browser canvas).
#[derive(PartialEq, PartialOrd, Copy, Clone, Debug)]
pub struct Width(pub f64);
#[derive(PartialEq, PartialOrd, Copy, Clone, Debug)]
pub struct Height(pub f64);
