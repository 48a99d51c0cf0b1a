//! 시작 과정 터미널 출력
//!
//! 저장소 준비, 템플릿 등록, 바인딩 결과를 사람이 읽기 좋게 보여줍니다.
//! 로그와 별개로 항상 표준 출력에 찍힙니다.

/// 시작 단계 수 (저장소, 템플릿)
pub const STARTUP_STEPS: u8 = 2;

const BANNER_WIDTH: usize = 50;

/// 가운데 정렬된 제목을 이중선 박스로 감쌉니다.
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║              🎮 Game & Book Catalog              ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn banner(title: &str) -> String {
    let border = "═".repeat(BANNER_WIDTH);
    format!(
        "╔{border}╗\n║{title:^width$}║\n╚{border}╝",
        width = BANNER_WIDTH
    )
}

pub fn print_banner(title: &str) {
    println!("{}", banner(title));
}

/// `→ [1/2] 저장소 초기화`
pub fn print_step_start(step: u8, description: &str) {
    println!("→ [{}/{}] {}", step, STARTUP_STEPS, description);
}

/// `✓ [1/2] 저장소 초기화: 3 collections`
pub fn print_step_done(step: u8, description: &str, detail: &str) {
    println!("✓ [{}/{}] {}: {}", step, STARTUP_STEPS, description, detail);
}

/// 컬렉션별 unique 인덱스 생성 결과
pub fn print_index_report(collection: &str, unique_fields: &[&str]) {
    if unique_fields.is_empty() {
        println!("   ├─ {}: no unique index", collection);
    } else {
        println!("   ├─ {}: unique {}", collection, unique_fields.join(", "));
    }
}

/// 서버가 요청을 받을 준비가 되었음을 알립니다.
pub fn print_ready(backend: &str, collections: usize, address: &str) {
    println!();
    print_banner("🎮 CATALOG READY");
    println!("   📦 Store: {} ({} collections)", backend, collections);
    println!("   🌐 Listening: http://{}", address);
    println!();
}
