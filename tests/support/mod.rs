//! テスト用のモックAPIと入力ファイル生成

#![allow(dead_code)]

use httpmock::prelude::*;
use httpmock::Mock;
use rust_xlsxwriter::{Workbook, Worksheet};
use serde_json::Value;
use std::path::Path;
use tokio::net::TcpListener;

/// モックAPIのパス
pub const ENDPOINT_PATH: &str = "/api/normalize";

/// City が一致するリクエストにだけ応答するモックを登録
pub async fn mock_city<'a>(server: &'a MockServer, city: &str, status: u16, body: Value) -> Mock<'a> {
    let city_field = format!(r#""City":"{}""#, city);
    server
        .mock_async(|when, then| {
            when.method(POST).path(ENDPOINT_PATH).body_includes(city_field);
            then.status(status)
                .header("content-type", "application/json")
                .json_body(body);
        })
        .await
}

/// 接続を受け付けないエンドポイント
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}{}", addr, ENDPOINT_PATH)
}

/// 正規化APIの成功レスポンス
pub fn api_response(combined: f64, city: &str, street: &str, postal: &str) -> Value {
    serde_json::json!({
        "normalizationMetadata": {
            "streetProbability": combined,
            "postalCodeProbability": combined,
            "cityProbability": combined,
            "combinedProbability": combined,
            "normalizationId": 1
        },
        "address": {
            "buildingNumber": "1",
            "city": city,
            "commune": city,
            "district": city,
            "postalCode": postal,
            "province": "mazowieckie",
            "streetName": street,
            "streetPrefix": "ul.",
            "isMultiFamily": false,
            "longitude": 21.0,
            "latitude": 52.2,
            "postOfficeLocation": city
        }
    })
}

/// 文字列セルを書き込む（空文字のセルは書かない）
pub fn fill_sheet(worksheet: &mut Worksheet, rows: &[Vec<&str>]) {
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                worksheet
                    .write_string(r as u32, c as u16, *value)
                    .expect("write cell");
            }
        }
    }
}

/// 文字列セルだけの入力xlsxを作成
pub fn write_input_xlsx(path: &Path, sheet_name: &str, rows: &[Vec<&str>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).expect("sheet name");
    fill_sheet(worksheet, rows);

    workbook.save(path).expect("save input");
}
