//! Typo detection for email domains.
//!
//! Candidates are ranked with the sift4 string distance; a domain is only
//! proposed when it is within [`THRESHOLD`] edits of what was typed.

pub const POPULAR_EMAIL_DOMAINS: [&str; 12] = [
    // Google
    "gmail.com",
    "googlemail.com",
    // Yahoo
    "yahoo.com",
    "ymail.com",
    "rocketmail.com",
    // Microsoft
    "outlook.com",
    "hotmail.com",
    "live.com",
    "msn.com",
    // Apple
    "icloud.com",
    "me.com",
    "mac.com",
];

pub const POPULAR_TOP_LEVEL_DOMAINS: [&str; 12] = [
    "com", "net", "org", "co", "io", "edu", "edu.in", "gov", "me", "in", "uk", "ru",
];

pub const SECOND_LEVEL_DOMAINS: [&str; 6] = ["yahoo", "hotmail", "mail", "live", "outlook", "gmx"];

const THRESHOLD: usize = 2;
const MAX_OFFSET: i64 = 5;

#[derive(serde::Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmailSuggestion {
    pub suggested_mail: String,
    pub display_text: String,
}

impl EmailSuggestion {
    pub fn new(suggested_mail: String) -> Self {
        let display_text = format!("Did you mean {suggested_mail}?");
        Self {
            suggested_mail,
            display_text,
        }
    }

    /// `None` when nothing is close enough or the correction equals the input.
    pub fn check(email: &str) -> Option<EmailSuggestion> {
        DomainLists::default()
            .suggest(email)
            .filter(|suggested| suggested != email)
            .map(EmailSuggestion::new)
    }
}

pub struct DomainLists<'a> {
    pub domains: &'a [&'a str],
    pub second_level_domains: &'a [&'a str],
    pub top_level_domains: &'a [&'a str],
}

impl Default for DomainLists<'static> {
    fn default() -> Self {
        Self {
            domains: &POPULAR_EMAIL_DOMAINS,
            second_level_domains: &SECOND_LEVEL_DOMAINS,
            top_level_domains: &POPULAR_TOP_LEVEL_DOMAINS,
        }
    }
}

struct EmailParts<'e> {
    address: &'e str,
    domain: &'e str,
    second_level_domain: &'e str,
    top_level_domain: &'e str,
}

impl<'e> EmailParts<'e> {
    fn split(email: &'e str) -> Option<EmailParts<'e>> {
        let (address, domain) = email.rsplit_once('@')?;
        if address.split('@').any(str::is_empty) || domain.is_empty() {
            return None;
        }

        let (second_level_domain, top_level_domain) = match domain.split_once('.') {
            Some((sld, tld)) => (sld, tld),
            None => ("", domain),
        };

        Some(EmailParts {
            address,
            domain,
            second_level_domain,
            top_level_domain,
        })
    }
}

impl DomainLists<'_> {
    /// Full corrected address, which may equal the (lowercased) input.
    pub fn suggest(&self, email: &str) -> Option<String> {
        let email = email.trim().to_lowercase();
        let parts = EmailParts::split(&email)?;

        if self.second_level_domains.contains(&parts.second_level_domain)
            && self.top_level_domains.contains(&parts.top_level_domain)
        {
            return None;
        }

        if let Some(closest) = closest_domain(parts.domain, self.domains) {
            if closest == parts.domain {
                return None;
            }
            return Some(format!("{}@{}", parts.address, closest));
        }

        let closest_sld = closest_domain(parts.second_level_domain, self.second_level_domains);
        let closest_tld = closest_domain(parts.top_level_domain, self.top_level_domains);

        let mut domain = parts.domain.to_owned();
        let mut corrected = false;

        if let Some(sld) = closest_sld.filter(|sld| *sld != parts.second_level_domain) {
            domain = domain.replacen(parts.second_level_domain, sld, 1);
            corrected = true;
        }
        if let Some(tld) = closest_tld.filter(|tld| *tld != parts.top_level_domain) {
            if !parts.second_level_domain.is_empty() {
                if domain.ends_with(parts.top_level_domain) {
                    domain.truncate(domain.len() - parts.top_level_domain.len());
                    domain.push_str(tld);
                }
                corrected = true;
            }
        }

        corrected.then(|| format!("{}@{}", parts.address, domain))
    }
}

fn closest_domain<'a>(domain: &str, candidates: &[&'a str]) -> Option<&'a str> {
    if domain.is_empty() || candidates.is_empty() {
        return None;
    }

    let mut min_distance = usize::MAX;
    let mut closest = None;
    for candidate in candidates {
        if domain == *candidate {
            return Some(*candidate);
        }
        let distance = sift4_distance(domain, candidate);
        if distance < min_distance {
            min_distance = distance;
            closest = Some(*candidate);
        }
    }

    closest.filter(|_| min_distance <= THRESHOLD)
}

#[derive(Clone, Copy)]
struct Offset {
    c1: i64,
    c2: i64,
    trans: bool,
}

/// sift4 (common version): an edit distance estimate that counts
/// transpositions, scanning at most `MAX_OFFSET` characters ahead.
fn sift4_distance(s1: &str, s2: &str) -> usize {
    let s1: Vec<char> = s1.chars().collect();
    let s2: Vec<char> = s2.chars().collect();
    if s1.is_empty() {
        return s2.len();
    }
    if s2.is_empty() {
        return s1.len();
    }

    let (l1, l2) = (s1.len() as i64, s2.len() as i64);
    let (mut c1, mut c2) = (0_i64, 0_i64);
    let (mut lcss, mut local_cs, mut trans) = (0_i64, 0_i64, 0_i64);
    let mut offsets: Vec<Offset> = Vec::new();

    while c1 < l1 && c2 < l2 {
        if s1[c1 as usize] == s2[c2 as usize] {
            local_cs += 1;
            let mut is_trans = false;
            let mut i = 0;
            while i < offsets.len() {
                let ofs = offsets[i];
                if c1 <= ofs.c1 || c2 <= ofs.c2 {
                    is_trans = (c2 - c1).abs() >= (ofs.c2 - ofs.c1).abs();
                    if is_trans {
                        trans += 1;
                    } else if !ofs.trans {
                        offsets[i].trans = true;
                        trans += 1;
                    }
                    break;
                } else if c1 > ofs.c2 && c2 > ofs.c1 {
                    offsets.remove(i);
                } else {
                    i += 1;
                }
            }
            offsets.push(Offset {
                c1,
                c2,
                trans: is_trans,
            });
        } else {
            lcss += local_cs;
            local_cs = 0;
            if c1 != c2 {
                c1 = c1.min(c2);
                c2 = c1;
            }
            let mut j = 0;
            while j < MAX_OFFSET && (c1 + j < l1 || c2 + j < l2) {
                if c1 + j < l1 && s1[(c1 + j) as usize] == s2[c2 as usize] {
                    c1 += j - 1;
                    c2 -= 1;
                    break;
                }
                if c2 + j < l2 && s1[c1 as usize] == s2[(c2 + j) as usize] {
                    c1 -= 1;
                    c2 += j - 1;
                    break;
                }
                j += 1;
            }
        }

        c1 += 1;
        c2 += 1;
        if c1 >= l1 || c2 >= l2 {
            lcss += local_cs;
            local_cs = 0;
            c1 = c1.min(c2);
            c2 = c1;
        }
    }
    lcss += local_cs;

    (l1.max(l2) - lcss + trans).max(0) as usize
}
