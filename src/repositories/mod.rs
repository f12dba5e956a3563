//! # Repository Layer
//!
//! MongoDB 컬렉션 접근과 Redis 캐시를 담당합니다.

pub mod users;

use mongodb::bson::oid::ObjectId;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use crate::core::errors::AppError;

/// MongoDB duplicate key 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

/// unique 인덱스 위반 여부
pub(crate) fn is_duplicate_key_error(error: &MongoError) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
    )
}

/// 경로 파라미터 등으로 전달된 ID 문자열 파싱 (실패 시 400)
pub(crate) fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex()).unwrap(), id);
        assert!(matches!(parse_object_id("not-an-id"), Err(AppError::ValidationError(_))));
    }
}
