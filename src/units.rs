#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnsCount(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowIndex(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnIndex(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellWidth(pub u32);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellHeight(pub u32);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct OffsetX(pub u32);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct OffsetY(pub u32);
