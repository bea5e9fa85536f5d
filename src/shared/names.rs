use rand::Rng;

pub const AI_NAMES: [&str; 20] = [
    "Alpha Snake",
    "Beta Snake",
    "Gamma Snake",
    "Delta Snake",
    "Echo Snake",
    "Foxtrot Snake",
    "Golf Snake",
    "Hotel Snake",
    "India Snake",
    "Juliet Snake",
    "Kilo Snake",
    "Lima Snake",
    "Mike Snake",
    "November Snake",
    "Oscar Snake",
    "Papa Snake",
    "Quebec Snake",
    "Romeo Snake",
    "Sierra Snake",
    "Tango Snake",
];

pub fn ai_name(slot: usize) -> String {
    AI_NAMES
        .get(slot)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("Snake {}", slot + 1))
}

pub fn default_player_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("Player{}", rng.gen_range(0..1000))
}
