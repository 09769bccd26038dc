use rand::seq::IndexedRandom;

/// Desktop browsers the site serves its full profile markup to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
    Chrome,
    Firefox,
    Edge,
}

const CHROME_WINDOWS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/129.0.0.0 Safari/537.36",
];

const FIREFOX_WINDOWS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:132.0) Gecko/20100101 Firefox/132.0",
];

const EDGE_WINDOWS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36 Edg/131.0.0.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36 Edg/130.0.0.0",
];

/// Pick a random Windows User-Agent for the given browser.
pub fn user_agent_for(browser: Browser) -> &'static str {
    let pool = match browser {
        Browser::Chrome => CHROME_WINDOWS,
        Browser::Firefox => FIREFOX_WINDOWS,
        Browser::Edge => EDGE_WINDOWS,
    };

    pool.choose(&mut rand::rng()).copied().unwrap_or(pool[0])
}

/// Random Chrome on Windows, which is what the age-gate cookie set expects.
pub fn random_user_agent() -> &'static str {
    user_agent_for(Browser::Chrome)
}
