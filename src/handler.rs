// Rocket routes for the Battlesnake webhook API
//
// Each route unpacks the request snapshot and hands it to the managed `Bot`.
// Decisions are synchronous and never fail, so handlers have no error path
// beyond rocket rejecting a malformed body.

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::Value;

use pathfinder_snake::bot::Bot;
use pathfinder_snake::types::GameState;

#[get("/")]
pub fn index(bot: &State<Bot>) -> Json<Value> {
    Json(bot.info())
}

#[post("/start", format = "json", data = "<req>")]
pub fn start(bot: &State<Bot>, req: Json<GameState>) -> Status {
    let GameState { game, turn, board, you } = req.into_inner();
    bot.start(&game, &turn, &board, &you);
    Status::Ok
}

/// Responds with `{"move": ...}` for the snake named in `you`
#[post("/move", format = "json", data = "<req>")]
pub fn get_move(bot: &State<Bot>, req: Json<GameState>) -> Json<Value> {
    let GameState { game, turn, board, you } = req.into_inner();
    Json(bot.get_move(&game, &turn, &board, &you))
}

#[post("/end", format = "json", data = "<req>")]
pub fn end(bot: &State<Bot>, req: Json<GameState>) -> Status {
    let GameState { game, turn, board, you } = req.into_inner();
    bot.end(&game, &turn, &board, &you);
    Status::Ok
}
