//! HTTP span helpers.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = normalise_path_for_span_name(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

fn normalise_path_for_span_name(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::request_span_name;

    #[test]
    fn uuid_segments_are_collapsed() {
        let names = request_span_name(
            "PATCH",
            "/cart/items/01936f5e-8b2a-7c3d-9e4f-0a1b2c3d4e5f",
        );

        assert_eq!(names.otel_path, "/cart/items/{uuid}");
        assert_eq!(names.otel_span_name, "PATCH /cart/items/{uuid}");
    }

    #[test]
    fn root_path_is_kept() {
        assert_eq!(request_span_name("GET", "/").otel_path, "/");
    }

    #[test]
    fn static_segments_are_kept() {
        assert_eq!(
            request_span_name("GET", "/admin/orders").otel_span_name,
            "GET /admin/orders"
        );
    }
}
