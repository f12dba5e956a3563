//! 터미널 출력 포맷팅 유틸리티
//!
//! 서비스 레지스트리 초기화와 소셜 로그인 설정 점검 결과를 터미널에 출력합니다.

/// 박스 내부 콘텐츠 너비
const BOX_WIDTH: usize = 50;

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║                  System Started                  ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    println!("{}", boxed_title(title));
}

fn boxed_title(title: &str) -> String {
    let border = "═".repeat(BOX_WIDTH);
    format!(
        "╔{border}╗\n║{title:^width$}║\n╚{border}╝",
        border = border,
        title = title,
        width = BOX_WIDTH - 1,
    )
}

/// 진행 단계 시작을 표시합니다
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 진행 단계 완료를 표시합니다
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// 하위 작업 상태를 트리 형태로 출력합니다
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 레지스트리 초기화 결과 요약
pub fn print_final_summary(repos: usize, services: usize) {
    println!();
    print_boxed_title("🎉 SERVICE REGISTRY INITIALIZED");
    println!("   📦 Repositories: {}", repos);
    println!("   🔧 Services: {}", services);
    println!("   🚀 Total Components: {}", repos + services);
    println!();
}

pub fn print_cache_initialized(cache_type: &str, count: usize) {
    println!("   ├─ {} Cache: {} entries loaded", cache_type, count);
}

/// 소셜 로그인 프로바이더별 설정 상태를 출력합니다
///
/// 설정이 누락된 프로바이더도 서버 기동은 가능하지만,
/// 해당 프로바이더의 로그인 요청은 설정 오류로 응답합니다.
pub fn print_provider_status(provider: &str, missing: &[&str]) {
    println!("{}", provider_status_line(provider, missing));
}

fn provider_status_line(provider: &str, missing: &[&str]) -> String {
    if missing.is_empty() {
        format!("   ├─ {:<6} ✓ configured", provider)
    } else {
        format!("   ├─ {:<6} ✗ missing {}", provider, missing.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_title_has_three_lines() {
        let rendered = boxed_title("READY");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('╔'));
        assert!(lines[1].contains("READY"));
        assert!(lines[2].ends_with('╝'));
    }

    #[test]
    fn test_provider_status_line() {
        assert!(provider_status_line("google", &[]).contains("configured"));

        let line = provider_status_line("naver", &["NAVER_CLIENT_ID", "NAVER_CLIENT_SECRET"]);
        assert!(line.contains("NAVER_CLIENT_ID, NAVER_CLIENT_SECRET"));
    }
}
