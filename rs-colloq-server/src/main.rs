use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, post, put, web};

use serde::{Deserialize, Serialize};
use rs_colloq_core::morphology::MorphoDictionary;
use rs_colloq_core::tagger::DictionaryTagger;
use rs_colloq_core::{ResourcePaths, TextConverter};

/// Struct representing query parameters for the `/v1/config` endpoint
#[derive(Deserialize)]
struct ConfigParams {
	filler_chance: Option<i32>,
	repetition_chance: Option<i32>,
}

/// Current chances, as returned by `GET /v1/config`
#[derive(Serialize)]
struct ConfigView {
	filler_chance: u32,
	repetition_chance: u32,
}

struct SharedData {
	converter: TextConverter<DictionaryTagger, Arc<MorphoDictionary>>,
}

impl SharedData {
	fn config_view(&self) -> ConfigView {
		let config = self.converter.config();
		ConfigView {
			filler_chance: config.filler_chance(),
			repetition_chance: config.repetition_chance(),
		}
	}
}

/// HTTP POST endpoint `/v1/convert`
///
/// Converts the request body (one sentence per line) and returns the
/// converted text.
#[post("/v1/convert")]
async fn post_convert(data: web::Data<Mutex<SharedData>>, body: String) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Converter lock failed"),
	};

	match shared_data.converter.convert_text(&body) {
		Ok(result) => HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(result),
		Err(e) => HttpResponse::InternalServerError().body(format!("Conversion failed: {e}")),
	}
}

#[get("/v1/config")]
async fn get_config(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Converter lock failed"),
	};
	HttpResponse::Ok().json(shared_data.config_view())
}

/// HTTP PUT endpoint `/v1/config`
///
/// Both provided chances are validated before anything is applied; a rejected
/// value leaves the whole configuration unchanged.
#[put("/v1/config")]
async fn put_config(data: web::Data<Mutex<SharedData>>, query: web::Query<ConfigParams>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Converter lock failed"),
	};

	let mut config = *shared_data.converter.config();
	if let Some(filler_chance) = query.filler_chance {
		if let Err(e) = config.set_filler_chance(filler_chance) {
			return HttpResponse::BadRequest().body(e);
		}
	}
	if let Some(repetition_chance) = query.repetition_chance {
		if let Err(e) = config.set_repetition_chance(repetition_chance) {
			return HttpResponse::BadRequest().body(e);
		}
	}
	shared_data.converter.set_config(config);
	log::info!(
		"FillerChance: {}, RepetitionChance: {}",
		config.filler_chance(),
		config.repetition_chance()
	);

	HttpResponse::Ok().json(shared_data.config_view())
}

/// Main entry point for the server.
///
/// Loads the converter resources once, wraps the converter in a `Mutex` and
/// starts an Actix-web HTTP server.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Resources are read from the default `./files-to-load/` locations.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let converter = TextConverter::initialize(&ResourcePaths::default())
		.map_err(|e| std::io::Error::other(format!("Could not initialize the converter: {e}")))?;
	let shared_data = SharedData { converter };
	let shared_converter = web::Data::new(Mutex::new(shared_data));

	log::info!("Listening on 127.0.0.1:5000");
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_converter.clone())
			.service(post_convert)
			.service(get_config)
			.service(put_config)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
