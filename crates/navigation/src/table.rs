/// Built-in Setup destinations, keyed by lowercase phrase.
pub(crate) const BUILTIN_ROUTES: &[(&str, &str)] = &[
    ("setup", "/lightning/setup/SetupOneHome/home"),
    ("home", "/lightning/setup/SetupOneHome/home"),
    ("users", "/lightning/setup/ManageUsers/home"),
    ("profiles", "/lightning/setup/EnhancedProfiles/home"),
    ("permission sets", "/lightning/setup/PermSets/home"),
    ("permission set groups", "/lightning/setup/PermSetGroups/home"),
    ("roles", "/lightning/setup/Roles/home"),
    ("public groups", "/lightning/setup/PublicGroups/home"),
    ("queues", "/lightning/setup/Queues/home"),
    ("flows", "/lightning/setup/Flows/home"),
    ("process builder", "/lightning/setup/ProcessAutomation/home"),
    ("workflow rules", "/lightning/setup/WorkflowRules/home"),
    ("approval processes", "/lightning/setup/ApprovalProcesses/home"),
    ("object manager", "/lightning/setup/ObjectManager/home"),
    ("schema builder", "/lightning/setup/SchemaBuilder/home"),
    ("custom metadata", "/lightning/setup/CustomMetadata/home"),
    ("custom settings", "/lightning/setup/CustomSettings/home"),
    ("apex classes", "/lightning/setup/ApexClasses/home"),
    ("apex triggers", "/lightning/setup/ApexTriggers/home"),
    ("apex jobs", "/lightning/setup/AsyncApexJobs/home"),
    ("scheduled jobs", "/lightning/setup/ScheduledJobs/home"),
    ("debug logs", "/lightning/setup/ApexDebugLogs/home"),
    ("deployment status", "/lightning/setup/DeployStatus/home"),
    ("installed packages", "/lightning/setup/ImportedPackage/home"),
    ("lightning app builder", "/lightning/setup/FlexiPageList/home"),
    ("app manager", "/lightning/setup/NavigationMenus/home"),
    ("sharing settings", "/lightning/setup/SecuritySharing/home"),
    ("named credentials", "/lightning/setup/NamedCredential/home"),
    ("remote site settings", "/lightning/setup/SecurityRemoteProxy/home"),
    ("login history", "/lightning/setup/OrgLoginHistory/home"),
    ("audit trail", "/lightning/setup/SecurityEvents/home"),
    ("company information", "/lightning/setup/CompanyProfileInfo/home"),
    ("email deliverability", "/lightning/setup/OrgEmailSettings/home"),
    ("sandboxes", "/lightning/setup/DataManagementCreateTestInstance/home"),
];
