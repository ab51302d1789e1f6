use chrono::{Duration, Utc};
use forkful_api::{Author, Comment, CommentId, Time};
use rand::{seq::SliceRandom, Rng};

const NUM_TOP_LEVEL: usize = 24;
const MAX_REPLIES: usize = 8;
const MAX_DEPTH: usize = 4;

const COMMENT_MIN_WORDS: usize = 4;
const COMMENT_MAX_WORDS: usize = 30;
const MAX_AGE_MINUTES: i64 = 60 * 24 * 30;
const MAX_LIKES: u64 = 20;

const FIRST_NAMES: &[&str] = &["Ada", "Chidi", "Funke", "Kwame", "Ngozi", "Tunde", "Zainab"];
const LAST_NAMES: &[&str] = &["Adeyemi", "Bello", "Eze", "Mensah", "Okafor", "Okoro"];

fn gen_author(rng: &mut impl Rng) -> Option<Author> {
    // Some comments come from deleted accounts
    if rng.gen_bool(0.1) {
        return None;
    }
    let first = FIRST_NAMES.choose(rng).map(|s| s.to_string());
    let last = LAST_NAMES.choose(rng).map(|s| s.to_string());
    let avatar = rng
        .gen_bool(0.5)
        .then(|| format!("https://avatars.example/{}.png", rng.gen::<u32>()));
    Some(Author {
        first_name: first,
        last_name: last,
        full_name: None,
        avatar,
    })
}

fn gen_comment(rng: &mut impl Rng, next_id: &mut i64, depth: usize, after: Time) -> Comment {
    let id = *next_id;
    *next_id += 1;
    let age = Utc::now() - after;
    let created_at = after + Duration::minutes(rng.gen_range(0..=age.num_minutes().max(0)));
    let like_count = rng.gen_range(0..=MAX_LIKES);
    let mut comment = Comment::new(
        CommentId::from(id),
        lipsum::lipsum_words(rng.gen_range(COMMENT_MIN_WORDS..=COMMENT_MAX_WORDS)),
    );
    comment.author = gen_author(rng);
    comment.created_at = Some(created_at);
    comment.like_count = like_count;
    comment.is_liked = like_count > 0 && rng.gen_bool(0.3);
    if depth < MAX_DEPTH {
        // Deeper levels get fewer replies
        let num_replies = rng.gen_range(0..=MAX_REPLIES >> depth);
        comment.replies = (0..num_replies)
            .map(|_| gen_comment(&mut *rng, next_id, depth + 1, created_at))
            .collect();
    }
    comment
}

fn main() {
    let mut rng = rand::thread_rng();
    let mut next_id = 1;
    let start = Utc::now() - Duration::minutes(MAX_AGE_MINUTES);
    let comments = (0..NUM_TOP_LEVEL)
        .map(|_| gen_comment(&mut rng, &mut next_id, 0, start))
        .collect::<Vec<_>>();
    println!(
        "{}",
        serde_json::to_string_pretty(&comments).expect("serializing comments")
    );
}
