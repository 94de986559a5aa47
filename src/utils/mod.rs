pub mod logging;
pub mod maxima_list;
