use std::io::Write;
use tempfile::NamedTempFile;

pub const REQUEST_HEADER: &str = "op,car_price,car_year,engine_volume,engine_power,country,car_id,customer_id,finance_option_id,down_payment,trade_in_value,term_months,has_insurance,yearly_mileage";

pub const VEHICLE_HEADER: &str = "id,brand_id,year,engine_power,price";

pub const FINANCE_OPTION_HEADER: &str = "id,name,interest_rate";

fn csv_file(header: &str, rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{header}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

pub fn requests_file(rows: &[&str]) -> NamedTempFile {
    csv_file(REQUEST_HEADER, rows)
}

pub fn vehicles_file(rows: &[&str]) -> NamedTempFile {
    csv_file(VEHICLE_HEADER, rows)
}

pub fn finance_options_file(rows: &[&str]) -> NamedTempFile {
    csv_file(FINANCE_OPTION_HEADER, rows)
}
