use rand::prelude::SliceRandom;
use rand::Rng;

pub fn rand_page() -> u32 {
    rand::thread_rng().gen_range(1..=5)
}

pub fn rand_limit() -> u32 {
    *[5, 10, 20].choose(&mut rand::thread_rng()).unwrap_or(&10)
}

pub fn rand_post_content() -> String {
    let contents = [
        "Hello social network!",
        "Check out my new post.",
        "Load testing the posts feed.",
        "Rust is the best language.",
    ];
    contents
        .choose(&mut rand::thread_rng())
        .unwrap_or(&contents[0])
        .to_string()
}

pub fn rand_comment_content() -> String {
    let contents = ["Nice post!", "I agree.", "Interesting point.", "Keep it up!"];
    contents
        .choose(&mut rand::thread_rng())
        .unwrap_or(&contents[0])
        .to_string()
}

pub fn rand_edited_content() -> String {
    format!("{} (edited)", rand_comment_content())
}
