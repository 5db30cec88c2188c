use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;

/// Adds CORS headers to every response so a browser front-end on another
/// origin can call the API.
pub struct Cors {
    allowed_origin: String,
}

impl Cors {
    pub fn new(allowed_origin: &str) -> Self {
        Cors {
            allowed_origin: allowed_origin.to_string(),
        }
    }
}

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "CORS Headers",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _req: &'r rocket::Request<'_>, res: &mut rocket::Response<'r>) {
        res.set_header(Header::new(
            "Access-Control-Allow-Origin",
            self.allowed_origin.clone(),
        ));
        res.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, POST, OPTIONS",
        ));
        res.set_header(Header::new("Access-Control-Allow-Headers", "Content-Type"));
        res.set_header(Header::new(
            "Access-Control-Expose-Headers",
            "Content-Disposition, X-Draft-Origin",
        ));
    }
}
