//! MJPEG (multipart/x-mixed-replace) ストリームのフレーミング
//!
//! 各フレームは `--BOUNDARY` 行とパートヘッダの後に JPEG データを続けて送る。
//! 受信側は SOI (`FF D8`) から EOI (`FF D9`) までを1フレームとして切り出す。

/// パート境界文字列
pub const BOUNDARY: &str = "aithinkercamframe";

/// レスポンスの Content-Type
pub const CONTENT_TYPE: &str = "multipart/x-mixed-replace; boundary=aithinkercamframe";

/// JPEG の開始マーカー (SOI)
pub const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];
/// JPEG の終了マーカー (EOI)
pub const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];

/// 1フレーム分のパートヘッダ
///
/// 直前のフレームとの区切りとなる CRLF から始まる。
pub fn part_header(content_length: usize) -> String {
    format!(
        "\r\n--{}\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\n\r\n",
        BOUNDARY, content_length
    )
}

/// SOI で始まり EOI で終わる完全な JPEG かどうか
pub fn is_complete_jpeg(data: &[u8]) -> bool {
    data.len() >= 4 && data.starts_with(&JPEG_SOI) && data.ends_with(&JPEG_EOI)
}

/// バッファ中の最初の SOI..=EOI を返す
///
/// 2つ目以降のフレームは `rest` を渡して繰り返し取り出す。
pub fn find_jpeg(buf: &[u8]) -> Option<(&[u8], &[u8])> {
    let start = find_marker(buf, JPEG_SOI)?;
    let body = &buf[start + JPEG_SOI.len()..];
    let end = start + JPEG_SOI.len() + find_marker(body, JPEG_EOI)? + JPEG_EOI.len();
    Some((&buf[start..end], &buf[end..]))
}

fn find_marker(buf: &[u8], marker: [u8; 2]) -> Option<usize> {
    buf.windows(2).position(|window| window == marker)
}
