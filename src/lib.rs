pub mod academic;
pub mod logging;
pub mod rows;

pub use academic::{
    academic_year, academic_year_of, current_academic_year, current_academic_year_info,
    AcademicYearInfo, YearInput,
};
pub use rows::{rows_from_columns, transform_to_rows, ColumnarData, RowRecord};
