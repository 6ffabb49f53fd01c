// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Alert Tag Catalog
 * Policy and classification tags attached to findings for external
 * reporting. The engine never interprets these.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use std::collections::BTreeMap;

pub type TagMap = BTreeMap<&'static str, &'static str>;

pub const OWASP_2021_A01_BROKEN_AC: (&str, &str) = (
    "OWASP_2021_A01",
    "https://owasp.org/Top10/A01_2021-Broken_Access_Control/",
);
pub const OWASP_2021_A03_INJECTION: (&str, &str) = (
    "OWASP_2021_A03",
    "https://owasp.org/Top10/A03_2021-Injection/",
);
pub const OWASP_2021_A06_VULN_COMP: (&str, &str) = (
    "OWASP_2021_A06",
    "https://owasp.org/Top10/A06_2021-Vulnerable_and_Outdated_Components/",
);
pub const OWASP_2017_A01_INJECTION: (&str, &str) = (
    "OWASP_2017_A01",
    "https://owasp.org/www-project-top-ten/2017/A1_2017-Injection.html",
);
pub const OWASP_2017_A03_DATA_EXPOSED: (&str, &str) = (
    "OWASP_2017_A03",
    "https://owasp.org/www-project-top-ten/2017/A3_2017-Sensitive_Data_Exposure.html",
);
pub const OWASP_2017_A05_BROKEN_AC: (&str, &str) = (
    "OWASP_2017_A05",
    "https://owasp.org/www-project-top-ten/2017/A5_2017-Broken_Access_Control.html",
);
pub const OWASP_2017_A09_VULN_COMP: (&str, &str) = (
    "OWASP_2017_A09",
    "https://owasp.org/www-project-top-ten/2017/A9_2017-Using_Components_with_Known_Vulnerabilities.html",
);
pub const WSTG_V42_CRYP_01_TLS: (&str, &str) = (
    "WSTG-v42-CRYP-01",
    "https://owasp.org/www-project-web-security-testing-guide/v42/4-Web_Application_Security_Testing/09-Testing_for_Weak_Cryptography/01-Testing_for_Weak_Transport_Layer_Security",
);
pub const WSTG_V42_ATHN_06_CACHE_WEAKNESS: (&str, &str) = (
    "WSTG-v42-ATHN-06",
    "https://owasp.org/www-project-web-security-testing-guide/v42/4-Web_Application_Security_Testing/04-Authentication_Testing/06-Testing_for_Browser_Cache_Weaknesses",
);

/// Policy tags carry no value; presence alone marks the detector as part of
/// that scan policy.
pub const POLICY_PENTEST: &str = "POLICY_PENTEST";
pub const POLICY_QA_STD: &str = "POLICY_QA_STD";

pub fn tag_map(tags: &[(&'static str, &'static str)]) -> TagMap {
    tags.iter().copied().collect()
}

/// CVE tags link the finding to the NVD entry, e.g. "CVE-2014-0160".
pub fn put_cve(map: &mut TagMap, cve: &'static str, url: &'static str) {
    map.insert(cve, url);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_map_builds_and_extends() {
        let mut map = tag_map(&[OWASP_2021_A06_VULN_COMP, (POLICY_PENTEST, "")]);
        put_cve(&mut map, "CVE-2014-0160", "https://nvd.nist.gov/vuln/detail/CVE-2014-0160");

        assert_eq!(map.len(), 3);
        assert!(map["OWASP_2021_A06"].contains("owasp.org"));
        assert_eq!(map[POLICY_PENTEST], "");
    }
}
