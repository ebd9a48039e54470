// ==========================================
// 单品盈利分析 - 文件解析器实现
// ==========================================
// 阶段: 文件读取与解析（原始行 → 表头:值 映射）
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 原始行（表头 → 去空白后的单元格文本）
pub type RawRow = HashMap<String, String>;

// ==========================================
// FileParser Trait
// ==========================================
pub trait FileParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

/// 检查文件存在
fn ensure_exists(path: &Path) -> ImportResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ImportError::FileNotFound(path.display().to_string()))
    }
}

/// 文件扩展名（小写）
fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: RawRow = headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.clone(), value.trim().to_string()))
                .collect();

            // 跳过完全空白的行
            if row.values().all(|v| v.is_empty()) {
                continue;
            }
            records.push(row);
        }

        Ok(records)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 读取第一个工作表，首行为表头
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for data_row in rows {
            let row: RawRow = headers
                .iter()
                .zip(data_row.iter())
                .map(|(header, cell)| (header.clone(), cell.to_string().trim().to_string()))
                .collect();

            if row.values().all(|v| v.is_empty()) {
                continue;
            }
            records.push(row);
        }

        Ok(records)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawRow>> {
        let path = file_path.as_ref();
        match extension_of(path).as_str() {
            "csv" => CsvParser.parse_to_raw_records(path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_records(path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = csv_file(&["Item,Price,Weight (g)", "Garlic, 2.39 ,362.87", "Cilantro,0.99,119"]);

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Item"), Some(&"Garlic".to_string()));
        assert_eq!(records[0].get("Price"), Some(&"2.39".to_string()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_records(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let temp_file = csv_file(&["Item,Price", "Garlic,2.39", ",", "Cilantro,0.99"]);

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        // 应跳过空行
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let temp_file = Builder::new().suffix(".txt").tempfile().unwrap();
        let result = UniversalFileParser.parse(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"));
    }

    fn xlsx_file(rows: &[&[&str]]) -> tempfile::NamedTempFile {
        let temp_file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                let column = (b'A' + c as u8) as char;
                sheet
                    .get_cell_mut(format!("{}{}", column, r + 1).as_str())
                    .set_value(*value);
            }
        }
        umya_spreadsheet::writer::xlsx::write(&book, temp_file.path()).unwrap();
        temp_file
    }

    #[test]
    fn test_excel_parser_valid_file() {
        let temp_file = xlsx_file(&[
            &["Item", "Price", "Weight (g)"],
            &["Garlic", "2.39", "362.87"],
            &["Cilantro", "0.99", "119"],
        ]);

        let records = UniversalFileParser.parse(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Item"), Some(&"Garlic".to_string()));
        let price: f64 = records[0].get("Price").unwrap().parse().unwrap();
        assert_eq!(price, 2.39);
        let weight: f64 = records[1].get("Weight (g)").unwrap().parse().unwrap();
        assert_eq!(weight, 119.0);
    }

    #[test]
    fn test_excel_parser_rejects_corrupt_file() {
        let mut temp_file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        writeln!(temp_file, "not a workbook").unwrap();

        let result = ExcelParser.parse_to_raw_records(temp_file.path());
        assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
    }
}
